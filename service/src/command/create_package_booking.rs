//! [`Command`] for creating a new [`booking::Package`].

use common::{
    money::Currency,
    operations::{By, Commit, Insert, Perform, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability::{Reservation, Reserve},
        booking, flight, hotel, pricing, user, Flight, Hotel,
    },
    infra::{database, Database},
    read::Insertion,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{
    create_flight_booking, create_hotel_booking, insert_with_fresh_key,
    Command,
};

/// [`Command`] for creating a new [`booking::Package`] of a [`Flight`] and a
/// [`Hotel`].
#[derive(Clone, Debug)]
pub struct CreatePackageBooking {
    /// ID of the [`User`] who books the [`booking::Package`].
    pub user_id: user::Id,

    /// [`flight::Order`] to be booked.
    pub flight: flight::Order,

    /// [`hotel::Order`] to be booked.
    pub hotel: hotel::Order,

    /// [`booking::package::Discount`] to apply to the total price.
    pub discount: booking::package::Discount,
}

impl<Db> Command<CreatePackageBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Flight>, flight::Id>>,
            Ok = Option<Flight>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Reserve>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<booking::Flight>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<
            Insert<booking::Hotel>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<
            Insert<booking::Package>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = booking::Package;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePackageBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePackageBooking {
            user_id,
            flight,
            hotel,
            discount,
        } = cmd;
        let attempts = self.config().max_reference_attempts;
        let today = Date::today();
        let package_id = booking::Id::new();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let flight = create_flight_booking::place(
            &tx,
            user_id,
            flight,
            Some(package_id),
            today,
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let hotel = create_hotel_booking::place(
            &tx,
            user_id,
            hotel,
            Some(package_id),
            today,
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let total_price = pricing::package_price(
            flight.total_price,
            hotel.total_price,
            discount,
        )
        .map_err(|_| {
            tracerr::new!(E::CurrencyMismatch {
                flight: flight.total_price.currency,
                hotel: hotel.total_price.currency,
            })
        })?;

        let flight = insert_with_fresh_key(&tx, flight, attempts)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReferenceCollision)
            .map_err(tracerr::wrap!())?;
        let hotel = insert_with_fresh_key(&tx, hotel, attempts)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReferenceCollision)
            .map_err(tracerr::wrap!())?;
        let package = booking::Package {
            id: package_id,
            reference: booking::Reference::generate(),
            user_id,
            flight,
            hotel,
            discount,
            total_price,
            status: booking::package::Status::Pending,
            created_at: booking::CreationDateTime::now(),
        };
        let package = insert_with_fresh_key(&tx, package, attempts)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReferenceCollision)
            .map_err(tracerr::wrap!())?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(package)
    }
}

/// Error of [`CreatePackageBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Prices of the [`Flight`] and the [`Hotel`] are in different
    /// currencies.
    #[display(
        "Flight price in `{flight}` cannot be combined with hotel price in \
         `{hotel}`"
    )]
    CurrencyMismatch {
        /// Currency of the [`Flight`] price.
        #[error(not(source))]
        flight: Currency,

        /// Currency of the [`Hotel`] price.
        hotel: Currency,
    },

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Placing the [`flight::Order`] failed.
    #[display("Failed to place `flight::Order`: {_0}")]
    #[from]
    Flight(create_flight_booking::ExecutionError),

    /// Placing the [`hotel::Order`] failed.
    #[display("Failed to place `hotel::Order`: {_0}")]
    #[from]
    Hotel(create_hotel_booking::ExecutionError),

    /// No free [`booking::Reference`] has been generated.
    #[display("Failed to generate a free `booking::Reference`")]
    ReferenceCollision,
}
