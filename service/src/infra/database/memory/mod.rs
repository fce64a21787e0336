//! In-memory [`Database`] implementation.
//!
//! Transactions are serializable: a [`Tx`] holds the whole [`Storage`] lock
//! from its first operation until it's committed or dropped, operating on a
//! staged copy which replaces the [`Storage`] only on [`Commit`].

mod impls;

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::Arc,
};

use common::{
    operations::{Commit, Transact},
    Money,
};
use derive_more::Deref;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

use crate::{
    domain::{
        airline, attraction, booking, city, flight, hotel, payment, user,
        Airline, Attraction, City, Flight, Hotel, Payment,
    },
    infra::{database, Database},
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<A = NonTx>(A);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Non-transactional [`Memory`] client, locking the [`Storage`] for a
/// single operation only.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`Storage`].
    storage: Arc<Mutex<Storage>>,
}

/// Transactional [`Memory`] client.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Shared [`Storage`] to lock on the first operation.
    storage: Arc<Mutex<Storage>>,

    /// Lazily locked [`Storage`] along with its staged copy.
    staged: Arc<Mutex<Option<Staged>>>,
}

/// [`Storage`] locked by a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// Guard of the shared [`Storage`].
    guard: OwnedMutexGuard<Storage>,

    /// Copy of the [`Storage`] the [`Tx`] operates on.
    copy: Storage,
}

impl Tx {
    /// Applies the staged changes of this [`Tx`] to the shared [`Storage`].
    async fn commit(&self) {
        let staged = self.staged.lock().await.take();
        if let Some(Staged { mut guard, copy }) = staged {
            *guard = copy;
        }
    }
}

/// Access to a [`Storage`].
pub trait Access {
    /// Reads the [`Storage`] with the provided function.
    fn read<R>(
        &self,
        f: impl FnOnce(&Storage) -> R,
    ) -> impl Future<Output = R>;

    /// Modifies the [`Storage`] with the provided function.
    fn write<R>(
        &self,
        f: impl FnOnce(&mut Storage) -> R,
    ) -> impl Future<Output = R>;
}

impl Access for NonTx {
    async fn read<R>(&self, f: impl FnOnce(&Storage) -> R) -> R {
        f(&*self.storage.lock().await)
    }

    async fn write<R>(&self, f: impl FnOnce(&mut Storage) -> R) -> R {
        f(&mut *self.storage.lock().await)
    }
}

impl Access for Tx {
    async fn read<R>(&self, f: impl FnOnce(&Storage) -> R) -> R {
        self.write(|s| f(s)).await
    }

    async fn write<R>(&self, f: impl FnOnce(&mut Storage) -> R) -> R {
        let mut staged = self.staged.lock().await;
        let staged = if let Some(s) = staged.as_mut() {
            s
        } else {
            let guard = Arc::clone(&self.storage).lock_owned().await;
            let copy = guard.clone();
            staged.insert(Staged { guard, copy })
        };
        f(&mut staged.copy)
    }
}

/// Stored rows of a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Storage {
    /// Stored [`City`]s.
    cities: HashMap<city::Id, City>,

    /// Stored [`Airline`]s.
    airlines: HashMap<airline::Id, Airline>,

    /// Stored [`Flight`]s.
    flights: HashMap<flight::Id, Flight>,

    /// Stored [`Hotel`]s.
    hotels: HashMap<hotel::Id, Hotel>,

    /// Stored [`Attraction`]s.
    attractions: HashMap<attraction::Id, Attraction>,

    /// Stored [`booking::Flight`]s, including the ones of packages.
    flight_bookings: HashMap<booking::Id, booking::Flight>,

    /// Stored [`booking::Hotel`]s, including the ones of packages.
    hotel_bookings: HashMap<booking::Id, booking::Hotel>,

    /// Stored [`booking::Package`]s.
    packages: HashMap<booking::Id, PackageRow>,

    /// Occupied [`booking::Reference`]s of all the [`booking::Booking`] kinds.
    references: HashSet<booking::Reference>,

    /// Stored [`Payment`]s.
    payments: HashMap<payment::Id, Payment>,

    /// Occupied [`payment::TransactionId`]s.
    transaction_ids: HashSet<payment::TransactionId>,
}

/// [`booking::Package`] row, referring its sub-bookings by IDs.
#[derive(Clone, Debug)]
struct PackageRow {
    /// ID of the [`booking::Package`].
    id: booking::Id,

    /// [`booking::Reference`] of the [`booking::Package`].
    reference: booking::Reference,

    /// ID of the [`booking::Package`] owner.
    user_id: user::Id,

    /// ID of the [`booking::Flight`] sub-booking.
    flight_booking_id: booking::Id,

    /// ID of the [`booking::Hotel`] sub-booking.
    hotel_booking_id: booking::Id,

    /// [`booking::package::Discount`] of the [`booking::Package`].
    discount: booking::package::Discount,

    /// Total price of the [`booking::Package`].
    total_price: Money,

    /// [`booking::package::Status`] of the [`booking::Package`].
    status: booking::package::Status,

    /// [`DateTime`] when the [`booking::Package`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    created_at: booking::CreationDateTime,
}

impl Storage {
    /// Assembles the [`booking::Booking`] with the provided ID.
    fn booking(&self, id: booking::Id) -> Option<booking::Booking> {
        if let Some(b) = self.flight_bookings.get(&id) {
            return Some(b.clone().into());
        }
        if let Some(b) = self.hotel_bookings.get(&id) {
            return Some(b.clone().into());
        }
        let row = self.packages.get(&id)?;
        Some(
            booking::Package {
                id: row.id,
                reference: row.reference.clone(),
                user_id: row.user_id,
                flight: self
                    .flight_bookings
                    .get(&row.flight_booking_id)?
                    .clone(),
                hotel: self.hotel_bookings.get(&row.hotel_booking_id)?.clone(),
                discount: row.discount,
                total_price: row.total_price,
                status: row.status,
                created_at: row.created_at,
            }
            .into(),
        )
    }
}

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(Tx {
            storage: Arc::clone(&self.0.storage),
            staged: Arc::new(Mutex::new(None)),
        }))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.0.commit().await;
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Insert, Select, Transact};

    use crate::{
        domain::{city, City},
        infra::Database as _,
    };

    use super::Memory;

    fn city() -> City {
        City {
            id: city::Id::new(),
            name: city::Name::new("Goa").unwrap(),
            country: city::Country::new("India").unwrap(),
            airport_code: city::AirportCode::new("GOI"),
        }
    }

    #[tokio::test]
    async fn commits() {
        let db = Memory::new();
        let city = city();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(city.clone())).await.unwrap();
        tx.execute(Commit).await.unwrap();

        let stored = db
            .execute(Select(By::<Option<City>, _>::new(city.id)))
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn rolls_back_on_drop() {
        let db = Memory::new();
        let city = city();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(city.clone())).await.unwrap();
        drop(tx);

        let stored = db
            .execute(Select(By::<Option<City>, _>::new(city.id)))
            .await
            .unwrap();
        assert!(stored.is_none());
    }
}
