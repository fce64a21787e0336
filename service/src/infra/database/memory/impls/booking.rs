//! [`Booking`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::{booking, user, Booking},
    infra::{
        database::{
            self,
            memory::{Access, PackageRow},
            Memory,
        },
        Database,
    },
    read::{self, Insertion},
};

impl<A: Access> Database<Insert<booking::Flight>> for Memory<A> {
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<booking::Flight>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                if !s.references.insert(booking.reference.clone()) {
                    return Insertion::Occupied;
                }
                drop(s.flight_bookings.insert(booking.id, booking));
                Insertion::Inserted
            })
            .await)
    }
}

impl<A: Access> Database<Insert<booking::Hotel>> for Memory<A> {
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<booking::Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                if !s.references.insert(booking.reference.clone()) {
                    return Insertion::Occupied;
                }
                drop(s.hotel_bookings.insert(booking.id, booking));
                Insertion::Inserted
            })
            .await)
    }
}

impl<A: Access> Database<Insert<booking::Package>> for Memory<A> {
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(package): Insert<booking::Package>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                if !s.references.insert(package.reference.clone()) {
                    return Insertion::Occupied;
                }
                let row = PackageRow {
                    id: package.id,
                    reference: package.reference,
                    user_id: package.user_id,
                    flight_booking_id: package.flight.id,
                    hotel_booking_id: package.hotel.id,
                    discount: package.discount,
                    total_price: package.total_price,
                    status: package.status,
                    created_at: package.created_at,
                };
                drop(s.packages.insert(row.id, row));
                Insertion::Inserted
            })
            .await)
    }
}

impl<A: Access> Database<Update<Booking>> for Memory<A> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| match booking {
            Booking::Flight(b) => {
                if let Some(row) = s.flight_bookings.get_mut(&b.id) {
                    *row = b;
                }
            }
            Booking::Hotel(b) => {
                if let Some(row) = s.hotel_bookings.get_mut(&b.id) {
                    *row = b;
                }
            }
            Booking::Package(p) => {
                if let Some(row) = s.packages.get_mut(&p.id) {
                    row.status = p.status;
                }
                if let Some(row) = s.flight_bookings.get_mut(&p.flight.id) {
                    *row = p.flight;
                }
                if let Some(row) = s.hotel_bookings.get_mut(&p.hotel.id) {
                    *row = p.hotel;
                }
            }
        })
        .await;
        Ok(())
    }
}

impl<A, IDs> Database<Select<By<HashMap<booking::Id, Booking>, IDs>>>
    for Memory<A>
where
    A: Access,
    IDs: AsRef<[booking::Id]>,
{
    type Ok = HashMap<booking::Id, Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<booking::Id, Booking>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        Ok(self
            .read(|s| {
                ids.as_ref()
                    .iter()
                    .filter_map(|id| s.booking(*id).map(|b| (*id, b)))
                    .collect()
            })
            .await)
    }
}

impl<A: Access> Database<Select<By<Option<Booking>, booking::Id>>>
    for Memory<A>
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<HashMap<_, _>, _>::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<A: Access> Database<Select<By<Option<Booking>, booking::Reference>>>
    for Memory<A>
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Reference>>,
    ) -> Result<Self::Ok, Self::Err> {
        let reference = by.into_inner();
        Ok(self
            .read(|s| {
                let id = s
                    .flight_bookings
                    .values()
                    .find(|b| b.reference == reference)
                    .map(|b| b.id)
                    .or_else(|| {
                        s.hotel_bookings
                            .values()
                            .find(|b| b.reference == reference)
                            .map(|b| b.id)
                    })
                    .or_else(|| {
                        s.packages
                            .values()
                            .find(|p| p.reference == reference)
                            .map(|p| p.id)
                    })?;
                s.booking(id)
            })
            .await)
    }
}

impl<A: Access> Database<Select<By<Vec<Booking>, user::Id>>> for Memory<A> {
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let mut bookings = self
            .read(|s| {
                let flights = s
                    .flight_bookings
                    .values()
                    .filter(|b| b.user_id == user_id && b.package_id.is_none())
                    .map(|b| b.id);
                let hotels = s
                    .hotel_bookings
                    .values()
                    .filter(|b| b.user_id == user_id && b.package_id.is_none())
                    .map(|b| b.id);
                let packages = s
                    .packages
                    .values()
                    .filter(|p| p.user_id == user_id)
                    .map(|p| p.id);
                flights
                    .chain(hotels)
                    .chain(packages)
                    .filter_map(|id| s.booking(id))
                    .collect::<Vec<_>>()
            })
            .await;
        bookings.sort_by_key(|b| std::cmp::Reverse(b.created_at()));
        Ok(bookings)
    }
}

impl<A: Access> Database<Lock<By<Booking, booking::Id>>> for Memory<A> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        // Any access locks the whole `Storage` for a transaction.
        self.read(|s| drop(s.booking(id))).await;
        Ok(())
    }
}

impl<A: Access> Database<Update<By<read::booking::CompletedCount, Date>>>
    for Memory<A>
{
    type Ok = read::booking::CompletedCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(by): Update<By<read::booking::CompletedCount, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        use booking::{flight::Status as F, hotel::Status as H};

        let today = by.into_inner();
        Ok(self
            .write(|s| {
                let mut count = 0_u64;

                let flight_dates = s
                    .flights
                    .iter()
                    .map(|(id, f)| (*id, f.date))
                    .collect::<HashMap<_, _>>();
                let passed = |b: &booking::Flight| {
                    flight_dates.get(&b.flight_id).is_some_and(|d| *d < today)
                };

                for b in s.flight_bookings.values_mut() {
                    if b.package_id.is_none()
                        && b.status == F::Confirmed
                        && passed(b)
                    {
                        b.status = F::Completed;
                        count += 1;
                    }
                }
                for b in s.hotel_bookings.values_mut() {
                    if b.package_id.is_none()
                        && b.status == H::Confirmed
                        && b.check_out < today
                    {
                        b.status = H::CheckedOut;
                        count += 1;
                    }
                }

                for p in s.packages.values_mut() {
                    if p.status != booking::package::Status::Confirmed {
                        continue;
                    }
                    let (Some(f), Some(h)) = (
                        s.flight_bookings.get(&p.flight_booking_id),
                        s.hotel_bookings.get(&p.hotel_booking_id),
                    ) else {
                        continue;
                    };
                    if !(passed(f) && h.check_out < today) {
                        continue;
                    }
                    p.status = booking::package::Status::Completed;
                    count += 1;
                    if let Some(f) =
                        s.flight_bookings.get_mut(&p.flight_booking_id)
                    {
                        f.status = F::Completed;
                    }
                    if let Some(h) =
                        s.hotel_bookings.get_mut(&p.hotel_booking_id)
                    {
                        h.status = H::CheckedOut;
                    }
                }

                count.into()
            })
            .await)
    }
}
