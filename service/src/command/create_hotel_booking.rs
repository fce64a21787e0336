//! [`Command`] for creating a new [`booking::Hotel`].

use common::{
    operations::{By, Commit, Insert, Perform, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        availability::{Reservation, Reserve, Resource},
        booking, hotel, pricing, user, Hotel,
    },
    infra::{database, Database},
    read::Insertion,
    Service,
};

use super::{insert_with_fresh_key, Command};

/// [`Command`] for creating a new [`booking::Hotel`].
#[derive(Clone, Debug)]
pub struct CreateHotelBooking {
    /// ID of the [`User`] who books the [`Hotel`].
    pub user_id: user::Id,

    /// [`hotel::Order`] to be booked.
    pub order: hotel::Order,
}

impl<Db> Command<CreateHotelBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Reserve>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<booking::Hotel>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = booking::Hotel;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateHotelBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateHotelBooking { user_id, order } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let booking = place(&tx, user_id, order, None, Date::today())
            .await
            .map_err(tracerr::wrap!())?;
        let booking = insert_with_fresh_key(
            &tx,
            booking,
            self.config().max_reference_attempts,
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
        .ok_or(E::ReferenceCollision)
        .map_err(tracerr::wrap!())?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Places the provided [`hotel::Order`] inside the given transaction: prices
/// it and reserves its rooms.
///
/// Returns a new [`booking::Hotel`] to be inserted, which belongs to the
/// provided [`booking::Package`], if any.
///
/// # Errors
///
/// If the [`hotel::Order`] cannot be fulfilled, or a [`Database`] operation
/// fails.
pub(crate) async fn place<Tx>(
    tx: &Tx,
    user_id: user::Id,
    order: hotel::Order,
    package_id: Option<booking::Id>,
    today: Date,
) -> Result<booking::Hotel, Traced<ExecutionError>>
where
    Tx: Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Reserve>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        >,
{
    use ExecutionError as E;

    let hotel::Order {
        hotel_id,
        check_in,
        check_out,
        rooms_count,
        guests_count,
        special_requests,
    } = order;

    if check_in < today {
        return Err(tracerr::new!(E::CheckInInPast(check_in)));
    }
    if check_out <= check_in {
        return Err(tracerr::new!(E::InvalidDateRange {
            check_in,
            check_out,
        }));
    }

    let hotel = tx
        .execute(Select(By::<Option<Hotel>, _>::new(hotel_id)))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
        .ok_or(E::HotelNotExists(hotel_id))
        .map_err(tracerr::wrap!())?;

    let rooms = rooms_count.quantity();
    if !hotel.capacity.fits(rooms) {
        return Err(tracerr::new!(E::CapacityExceeded(hotel_id)));
    }

    let total_price =
        pricing::hotel_price(&hotel, check_in, check_out, rooms_count)
            .map_err(|_| {
                tracerr::new!(E::InvalidDateRange {
                    check_in,
                    check_out,
                })
            })?;

    // Rooms may run out since the check above.
    match tx
        .execute(Perform(Reserve {
            resource: Resource::Hotel(hotel_id),
            quantity: rooms,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
    {
        Some(Reservation::Reserved(_)) => {}
        Some(Reservation::Insufficient(_)) => {
            return Err(tracerr::new!(E::CapacityExceeded(hotel_id)));
        }
        None => return Err(tracerr::new!(E::HotelNotExists(hotel_id))),
    }

    Ok(booking::Hotel {
        id: booking::Id::new(),
        reference: booking::Reference::generate(),
        user_id,
        hotel_id,
        check_in,
        check_out,
        rooms_count,
        guests_count,
        special_requests,
        total_price,
        status: booking::hotel::Status::Pending,
        package_id,
        created_at: booking::CreationDateTime::now(),
    })
}

/// Error of [`CreateHotelBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Hotel`] has not enough rooms left.
    #[display("`Hotel(id: {_0})` has not enough rooms left")]
    CapacityExceeded(#[error(not(source))] hotel::Id),

    /// Check-in [`Date`] has passed already.
    #[display("Check-in date `{_0}` is in the past")]
    CheckInInPast(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] with the provided ID does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// Check-out [`Date`] is not after the check-in one.
    #[display("Check-out date `{check_out}` is not after `{check_in}`")]
    InvalidDateRange {
        /// Requested check-in [`Date`].
        #[error(not(source))]
        check_in: Date,

        /// Requested check-out [`Date`].
        check_out: Date,
    },

    /// No free [`booking::Reference`] has been generated.
    #[display("Failed to generate a free `booking::Reference`")]
    ReferenceCollision,
}
