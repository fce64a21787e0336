//! [`Booking`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Date, Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, user, Booking},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::{self, Insertion},
};

/// Expands to the selected columns of the `bookings` table.
macro_rules! booking_columns {
    () => {
        "id, kind, reference, user_id, \
         total_price, total_price_currency, status, \
         package_id, created_at, \
         flight_id, passenger_count, travel_class, \
         hotel_id, check_in, check_out, rooms_count, guests_count, \
         special_requests, \
         discount"
    };
}

/// Converts the provided [`Row`] into a [`booking::Flight`].
fn flight_from_row(row: &Row) -> booking::Flight {
    booking::Flight {
        id: row.get("id"),
        reference: row.get("reference"),
        user_id: row.get("user_id"),
        flight_id: row.get("flight_id"),
        passenger_count: booking::flight::PassengerCount::new(
            row.get::<_, i16>("passenger_count"),
        )
        .expect("`passenger_count` out of range"),
        travel_class: row.get("travel_class"),
        total_price: Money {
            amount: row.get("total_price"),
            currency: row.get("total_price_currency"),
        },
        status: row.get("status"),
        package_id: row.get("package_id"),
        created_at: row.get("created_at"),
    }
}

/// Converts the provided [`Row`] into a [`booking::Hotel`].
fn hotel_from_row(row: &Row) -> booking::Hotel {
    booking::Hotel {
        id: row.get("id"),
        reference: row.get("reference"),
        user_id: row.get("user_id"),
        hotel_id: row.get("hotel_id"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        rooms_count: booking::hotel::RoomsCount::new(
            row.get::<_, i16>("rooms_count"),
        )
        .expect("`rooms_count` out of range"),
        guests_count: booking::hotel::GuestsCount::new(
            row.get::<_, i16>("guests_count"),
        )
        .expect("`guests_count` out of range"),
        special_requests: row.get("special_requests"),
        total_price: Money {
            amount: row.get("total_price"),
            currency: row.get("total_price_currency"),
        },
        status: row.get("status"),
        package_id: row.get("package_id"),
        created_at: row.get("created_at"),
    }
}

/// Converts the provided [`booking::Kind::Package`] [`Row`] into a
/// [`booking::Package`] with the provided sub-bookings.
fn package_from_row(
    row: &Row,
    flight: booking::Flight,
    hotel: booking::Hotel,
) -> booking::Package {
    booking::Package {
        id: row.get("id"),
        reference: row.get("reference"),
        user_id: row.get("user_id"),
        flight,
        hotel,
        discount: row.get("discount"),
        total_price: Money {
            amount: row.get("total_price"),
            currency: row.get("total_price_currency"),
        },
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

/// Converts the number of affected rows into an [`Insertion`].
fn insertion(affected: u64) -> Insertion {
    if affected == 0 {
        Insertion::Occupied
    } else {
        Insertion::Inserted
    }
}

impl<C> Database<Insert<booking::Flight>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<booking::Flight>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let passengers = i16::try_from(booking.passenger_count.get())
            .expect("`passenger_count` overflow");

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, kind, reference, user_id, \
                total_price, total_price_currency, status, \
                package_id, created_at, \
                flight_id, passenger_count, travel_class\
            ) VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, $4::UUID, \
                $5::NUMERIC, $6::INT2, $7::INT2, \
                $8::UUID, $9::TIMESTAMPTZ, \
                $10::UUID, $11::INT2, $12::INT2\
            ) \
            ON CONFLICT (reference) DO NOTHING";
        self.exec(
            SQL,
            &[
                &booking.id,
                &booking::Kind::Flight,
                &booking.reference,
                &booking.user_id,
                &booking.total_price.amount,
                &booking.total_price.currency,
                &booking.status,
                &booking.package_id,
                &booking.created_at,
                &booking.flight_id,
                &passengers,
                &booking.travel_class,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(insertion)
    }
}

impl<C> Database<Insert<booking::Hotel>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<booking::Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let rooms = i16::try_from(booking.rooms_count.get())
            .expect("`rooms_count` overflow");
        let guests = i16::try_from(booking.guests_count.get())
            .expect("`guests_count` overflow");

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, kind, reference, user_id, \
                total_price, total_price_currency, status, \
                package_id, created_at, \
                hotel_id, check_in, check_out, rooms_count, guests_count, \
                special_requests\
            ) VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, $4::UUID, \
                $5::NUMERIC, $6::INT2, $7::INT2, \
                $8::UUID, $9::TIMESTAMPTZ, \
                $10::UUID, $11::DATE, $12::DATE, $13::INT2, $14::INT2, \
                $15::VARCHAR\
            ) \
            ON CONFLICT (reference) DO NOTHING";
        self.exec(
            SQL,
            &[
                &booking.id,
                &booking::Kind::Hotel,
                &booking.reference,
                &booking.user_id,
                &booking.total_price.amount,
                &booking.total_price.currency,
                &booking.status,
                &booking.package_id,
                &booking.created_at,
                &booking.hotel_id,
                &booking.check_in,
                &booking.check_out,
                &rooms,
                &guests,
                &booking.special_requests,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(insertion)
    }
}

impl<C> Database<Insert<booking::Package>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(package): Insert<booking::Package>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO bookings (\
                id, kind, reference, user_id, \
                total_price, total_price_currency, status, \
                created_at, discount\
            ) VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, $4::UUID, \
                $5::NUMERIC, $6::INT2, $7::INT2, \
                $8::TIMESTAMPTZ, $9::NUMERIC\
            ) \
            ON CONFLICT (reference) DO NOTHING";
        self.exec(
            SQL,
            &[
                &package.id,
                &booking::Kind::Package,
                &package.reference,
                &package.user_id,
                &package.total_price.amount,
                &package.total_price.currency,
                &package.status,
                &package.created_at,
                &package.discount,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(insertion)
    }
}

impl<C> Database<Update<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let (ids, statuses): (Vec<booking::Id>, Vec<i16>) = match &booking {
            Booking::Flight(b) => (vec![b.id], vec![b.status.u8().into()]),
            Booking::Hotel(b) => (vec![b.id], vec![b.status.u8().into()]),
            Booking::Package(p) => (
                vec![p.id, p.flight.id, p.hotel.id],
                vec![
                    p.status.u8().into(),
                    p.flight.status.u8().into(),
                    p.hotel.status.u8().into(),
                ],
            ),
        };

        const SQL: &str = "\
            UPDATE bookings AS b \
            SET status = u.status \
            FROM unnest($1::UUID[], $2::INT2[]) AS u(id, status) \
            WHERE b.id = u.id";
        self.exec(SQL, &[&ids, &statuses])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, IDs> Database<Select<By<HashMap<booking::Id, Booking>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[booking::Id]>,
{
    type Ok = HashMap<booking::Id, Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<booking::Id, Booking>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        let ids = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = concat!(
            "SELECT ",
            booking_columns!(),
            " FROM bookings \
              WHERE id = ANY($1::UUID[]) \
                 OR package_id = ANY($1::UUID[])",
        );
        let rows = self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?;

        let mut flights = HashMap::new();
        let mut hotels = HashMap::new();
        let mut packages = Vec::new();
        for row in &rows {
            match row.get("kind") {
                booking::Kind::Flight => {
                    let b = flight_from_row(row);
                    drop(flights.insert(b.id, b));
                }
                booking::Kind::Hotel => {
                    let b = hotel_from_row(row);
                    drop(hotels.insert(b.id, b));
                }
                booking::Kind::Package => packages.push(row),
            }
        }

        let mut found = HashMap::with_capacity(ids.len());
        for row in packages {
            let id: booking::Id = row.get("id");
            let flight = flights.values().find(|b| b.package_id == Some(id));
            let hotel = hotels.values().find(|b| b.package_id == Some(id));
            if let (Some(flight), Some(hotel)) = (flight, hotel) {
                let package =
                    package_from_row(row, flight.clone(), hotel.clone());
                drop(found.insert(id, package.into()));
            }
        }
        for (id, b) in flights {
            if ids.contains(&id) {
                drop(found.insert(id, b.into()));
            }
        }
        for (id, b) in hotels {
            if ids.contains(&id) {
                drop(found.insert(id, b.into()));
            }
        }
        Ok(found)
    }
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<booking::Id, Booking>, [booking::Id; 1]>>,
        Ok = HashMap<booking::Id, Booking>,
        Err = Traced<database::Error>,
    >,
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

impl<C> Database<Select<By<Option<Booking>, booking::Reference>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Booking>, booking::Id>>,
        Ok = Option<Booking>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Reference>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let reference: booking::Reference = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE reference = $1::VARCHAR";
        let Some(row) = self
            .query_opt(SQL, &[&reference])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };
        self.execute(Select(By::<Option<Booking>, _>::new(
            row.get::<_, booking::Id>("id"),
        )))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Booking>, user::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<booking::Id, Booking>, Vec<booking::Id>>>,
        Ok = HashMap<booking::Id, Booking>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let user_id: user::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE user_id = $1::UUID \
              AND package_id IS NULL \
            ORDER BY created_at DESC, id";
        let ids = self
            .query(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect::<Vec<booking::Id>>();

        let mut bookings = self
            .execute(Select(By::<HashMap<_, _>, _>::new(ids.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(ids.into_iter().filter_map(|id| bookings.remove(&id)).collect())
    }
}

impl<C> Database<Lock<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE id = $1::UUID \
               OR package_id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<By<read::booking::CompletedCount, Date>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::CompletedCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(by): Update<By<read::booking::CompletedCount, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        use booking::{
            flight::Status as F, hotel::Status as H, package::Status as P,
            Kind as K,
        };

        // Avoid subtle change for SQL.
        let today: Date = by.into_inner();

        const FLIGHTS_SQL: &str = "\
            UPDATE bookings AS b \
            SET status = $3::INT2 \
            FROM flights AS f \
            WHERE b.kind = $2::INT2 \
              AND b.package_id IS NULL \
              AND b.status = $4::INT2 \
              AND f.id = b.flight_id \
              AND f.date < $1::DATE";
        let flights = self
            .exec(
                FLIGHTS_SQL,
                &[&today, &K::Flight, &F::Completed, &F::Confirmed],
            )
            .await
            .map_err(tracerr::wrap!())?;

        const HOTELS_SQL: &str = "\
            UPDATE bookings \
            SET status = $3::INT2 \
            WHERE kind = $2::INT2 \
              AND package_id IS NULL \
              AND status = $4::INT2 \
              AND check_out < $1::DATE";
        let hotels = self
            .exec(
                HOTELS_SQL,
                &[&today, &K::Hotel, &H::CheckedOut, &H::Confirmed],
            )
            .await
            .map_err(tracerr::wrap!())?;

        const PACKAGES_SQL: &str = "\
            WITH done AS (\
                SELECT p.id \
                FROM bookings AS p \
                INNER JOIN bookings AS fb \
                        ON fb.package_id = p.id AND fb.kind = $2::INT2 \
                INNER JOIN flights AS f ON f.id = fb.flight_id \
                INNER JOIN bookings AS hb \
                        ON hb.package_id = p.id AND hb.kind = $3::INT2 \
                WHERE p.kind = $4::INT2 \
                  AND p.status = $5::INT2 \
                  AND f.date < $1::DATE \
                  AND hb.check_out < $1::DATE \
                FOR UPDATE OF p\
            ), subs AS (\
                UPDATE bookings AS s \
                SET status = CASE s.kind \
                                 WHEN $2::INT2 THEN $6::INT2 \
                                 ELSE $7::INT2 \
                             END \
                FROM done \
                WHERE s.package_id = done.id\
            ) \
            UPDATE bookings AS p \
            SET status = $8::INT2 \
            FROM done \
            WHERE p.id = done.id";
        let packages = self
            .exec(
                PACKAGES_SQL,
                &[
                    &today,
                    &K::Flight,
                    &K::Hotel,
                    &K::Package,
                    &P::Confirmed,
                    &F::Completed,
                    &H::CheckedOut,
                    &P::Completed,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;

        Ok((flights + hotels + packages).into())
    }
}
