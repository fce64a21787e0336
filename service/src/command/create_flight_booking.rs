//! [`Command`] for creating a new [`booking::Flight`].

use common::{
    operations::{By, Commit, Insert, Perform, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability::{Reservation, Reserve, Resource},
        booking, flight, pricing, user, Flight,
    },
    infra::{database, Database},
    read::Insertion,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{insert_with_fresh_key, Command};

/// [`Command`] for creating a new [`booking::Flight`].
#[derive(Clone, Copy, Debug)]
pub struct CreateFlightBooking {
    /// ID of the [`User`] who books the [`Flight`].
    pub user_id: user::Id,

    /// [`flight::Order`] to be booked.
    pub order: flight::Order,
}

impl<Db> Command<CreateFlightBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Flight>, flight::Id>>,
            Ok = Option<Flight>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Reserve>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<booking::Flight>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = booking::Flight;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateFlightBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateFlightBooking { user_id, order } = cmd;

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

/// Places the provided [`flight::Order`] inside the given transaction:
/// prices it and reserves its seats.
///
/// Returns a new [`booking::Flight`] to be inserted, which belongs to the
/// provided [`booking::Package`], if any.
///
/// # Errors
///
/// If the [`flight::Order`] cannot be fulfilled, or a [`Database`] operation
/// fails.
pub(crate) async fn place<Tx>(
    tx: &Tx,
    user_id: user::Id,
    order: flight::Order,
    package_id: Option<booking::Id>,
    today: Date,
) -> Result<booking::Flight, Traced<ExecutionError>>
where
    Tx: Database<
            Select<By<Option<Flight>, flight::Id>>,
            Ok = Option<Flight>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Reserve>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        >,
{
    use ExecutionError as E;

    let flight::Order {
        flight_id,
        passenger_count,
        travel_class,
    } = order;

    let flight = tx
        .execute(Select(By::<Option<Flight>, _>::new(flight_id)))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
        .ok_or(E::FlightNotExists(flight_id))
        .map_err(tracerr::wrap!())?;
    if !flight.is_bookable(today) {
        return Err(tracerr::new!(E::FlightNotBookable(flight_id)));
    }

    let seats = passenger_count.quantity();
    if !flight.capacity.fits(seats) {
        return Err(tracerr::new!(E::CapacityExceeded(flight_id)));
    }

    let total_price =
        pricing::flight_price(&flight, travel_class, passenger_count)
            .map_err(|_| tracerr::new!(E::UnavailableClass(travel_class)))?;

    // Seats may run out since the check above.
    match tx
        .execute(Perform(Reserve {
            resource: Resource::Flight(flight_id),
            quantity: seats,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
    {
        Some(Reservation::Reserved(_)) => {}
        Some(Reservation::Insufficient(_)) => {
            return Err(tracerr::new!(E::CapacityExceeded(flight_id)));
        }
        None => return Err(tracerr::new!(E::FlightNotExists(flight_id))),
    }

    Ok(booking::Flight {
        id: booking::Id::new(),
        reference: booking::Reference::generate(),
        user_id,
        flight_id,
        passenger_count,
        travel_class,
        total_price,
        status: booking::flight::Status::Pending,
        package_id,
        created_at: booking::CreationDateTime::now(),
    })
}

/// Error of [`CreateFlightBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Flight`] has not enough seats left.
    #[display("`Flight(id: {_0})` has not enough seats left")]
    CapacityExceeded(#[error(not(source))] flight::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Flight`] cannot be booked anymore.
    #[display("`Flight(id: {_0})` is not bookable")]
    FlightNotBookable(#[error(not(source))] flight::Id),

    /// [`Flight`] with the provided ID does not exist.
    #[display("`Flight(id: {_0})` does not exist")]
    FlightNotExists(#[error(not(source))] flight::Id),

    /// No free [`booking::Reference`] has been generated.
    #[display("Failed to generate a free `booking::Reference`")]
    ReferenceCollision,

    /// [`Flight`] has no seats of the requested [`flight::TravelClass`].
    #[display("`{_0}` travel class is unavailable")]
    UnavailableClass(#[error(not(source))] flight::TravelClass),
}
