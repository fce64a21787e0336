//! [`Command`] definition.

pub mod cancel_booking;
pub mod create_flight_booking;
pub mod create_hotel_booking;
pub mod create_package_booking;
pub mod record_payment;
pub mod release_capacity;
pub mod reserve_capacity;

use std::num::NonZeroU8;

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{booking, payment, Payment},
    infra::{database, Database},
    read::Insertion,
};

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    cancel_booking::CancelBooking,
    create_flight_booking::CreateFlightBooking,
    create_hotel_booking::CreateHotelBooking,
    create_package_booking::CreatePackageBooking,
    record_payment::RecordPayment, release_capacity::ReleaseCapacity,
    reserve_capacity::ReserveCapacity,
};

/// Value stored under a unique key, which is regenerated once the current
/// one turns out to be occupied.
pub(crate) trait Rekey {
    /// Replaces the unique key of this value with a freshly generated one.
    fn rekey(&mut self);
}

impl Rekey for booking::Flight {
    fn rekey(&mut self) {
        self.reference = booking::Reference::generate();
    }
}

impl Rekey for booking::Hotel {
    fn rekey(&mut self) {
        self.reference = booking::Reference::generate();
    }
}

impl Rekey for booking::Package {
    fn rekey(&mut self) {
        self.reference = booking::Reference::generate();
    }
}

impl Rekey for Payment {
    fn rekey(&mut self) {
        self.transaction_id =
            payment::TransactionId::generate(self.created_at);
    }
}

/// Inserts the provided `value` into the [`Database`], [`Rekey`]ing it each
/// time its unique key is occupied.
///
/// [`None`] is returned if no free key was found in the given number of
/// `attempts`.
async fn insert_with_fresh_key<Db, V>(
    db: &Db,
    mut value: V,
    attempts: NonZeroU8,
) -> Result<Option<V>, Traced<database::Error>>
where
    Db: Database<Insert<V>, Ok = Insertion, Err = Traced<database::Error>>,
    V: Clone + Rekey,
{
    for _ in 0..attempts.get() {
        match db
            .execute(Insert(value.clone()))
            .await
            .map_err(tracerr::wrap!())?
        {
            Insertion::Inserted => return Ok(Some(value)),
            Insertion::Occupied => value.rekey(),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroU8;

    use common::{money::Currency, operations::Insert, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            booking::{self, flight::PassengerCount},
            flight, payment, user, Payment,
        },
        infra::{database::Memory, Database as _},
        read::Insertion,
    };

    use super::insert_with_fresh_key;

    fn usd(amount: i64) -> Money {
        Money {
            amount: Decimal::from(amount),
            currency: Currency::Usd,
        }
    }

    fn flight_booking(reference: &booking::Reference) -> booking::Flight {
        booking::Flight {
            id: booking::Id::new(),
            reference: reference.clone(),
            user_id: user::Id::new(),
            flight_id: flight::Id::new(),
            passenger_count: PassengerCount::new(1).unwrap(),
            travel_class: flight::TravelClass::Economy,
            total_price: usd(100),
            status: booking::flight::Status::Pending,
            package_id: None,
            created_at: booking::CreationDateTime::now(),
        }
    }

    fn payment(transaction_id: &payment::TransactionId) -> Payment {
        Payment {
            id: payment::Id::new(),
            transaction_id: transaction_id.clone(),
            target: payment::Target::Flight(booking::Id::new()),
            amount: usd(100),
            method: payment::Method::Paypal,
            status: payment::Status::Completed,
            created_at: payment::CreationDateTime::now(),
        }
    }

    fn attempts(n: u8) -> NonZeroU8 {
        NonZeroU8::new(n).unwrap()
    }

    #[tokio::test]
    async fn regenerates_occupied_reference() {
        let db = Memory::new();
        let taken = booking::Reference::generate();
        let res = db.execute(Insert(flight_booking(&taken))).await.unwrap();
        assert_eq!(res, Insertion::Inserted);

        let placed =
            insert_with_fresh_key(&db, flight_booking(&taken), attempts(3))
                .await
                .unwrap()
                .expect("free reference is not found");

        assert_ne!(placed.reference, taken);
        assert_eq!(
            db.execute(Insert(placed)).await.unwrap(),
            Insertion::Occupied,
            "regenerated reference is not stored",
        );
    }

    #[tokio::test]
    async fn gives_up_after_attempts() {
        let db = Memory::new();
        let taken = booking::Reference::generate();
        _ = db.execute(Insert(flight_booking(&taken))).await.unwrap();

        let res =
            insert_with_fresh_key(&db, flight_booking(&taken), attempts(1))
                .await
                .unwrap();

        assert!(res.is_none());
    }

    #[tokio::test]
    async fn regenerates_occupied_transaction_id() {
        let db = Memory::new();
        let taken =
            payment::TransactionId::generate(payment::CreationDateTime::now());
        _ = db.execute(Insert(payment(&taken))).await.unwrap();

        let paid = insert_with_fresh_key(&db, payment(&taken), attempts(2))
            .await
            .unwrap()
            .expect("free transaction ID is not found");

        assert_ne!(paid.transaction_id, taken);
        assert!(insert_with_fresh_key(&db, payment(&taken), attempts(1))
            .await
            .unwrap()
            .is_none());
    }
}
