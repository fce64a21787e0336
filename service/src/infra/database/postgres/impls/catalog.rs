//! Reference catalog [`Database`] implementations.

use common::{
    money,
    operations::{By, Insert, Select},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        airline, city, flight, hotel, Airline, Attraction, City, Flight, Hotel,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{capacity, star_rating};

impl<C> Database<Insert<City>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(city): Insert<City>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO cities (id, name, country, airport_code) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                country = EXCLUDED.country, \
                airport_code = EXCLUDED.airport_code";
        self.exec(
            SQL,
            &[&city.id, &city.name, &city.country, &city.airport_code],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<City>, city::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, city::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: city::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, country, airport_code \
            FROM cities \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| City {
                id: row.get("id"),
                name: row.get("name"),
                country: row.get("country"),
                airport_code: row.get("airport_code"),
            }))
    }
}

impl<C> Database<Insert<Airline>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(airline): Insert<Airline>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO airlines (id, name, code) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                code = EXCLUDED.code";
        self.exec(SQL, &[&airline.id, &airline.name, &airline.code])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Airline>, airline::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Airline>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Airline>, airline::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: airline::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, code \
            FROM airlines \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Airline {
                id: row.get("id"),
                name: row.get("name"),
                code: row.get("code"),
            }))
    }
}

/// Expands to the selected columns of the `flights` table.
macro_rules! flight_columns {
    () => {
        "id, number, airline_id, source_city_id, destination_city_id, \
         departure_time, arrival_time, date, \
         economy_price, business_price, price_currency, \
         total_seats, available_seats, status"
    };
}

/// Converts the provided [`Row`] of `flight_columns!` into a [`Flight`].
fn flight_from_row(row: &Row) -> Flight {
    let currency: money::Currency = row.get("price_currency");
    Flight {
        id: row.get("id"),
        number: row.get("number"),
        airline_id: row.get("airline_id"),
        source_city_id: row.get("source_city_id"),
        destination_city_id: row.get("destination_city_id"),
        departure_time: row.get("departure_time"),
        arrival_time: row.get("arrival_time"),
        date: row.get("date"),
        economy_price: Money {
            amount: row.get("economy_price"),
            currency,
        },
        business_price: row
            .get::<_, Option<Decimal>>("business_price")
            .map(|amount| Money { amount, currency }),
        capacity: capacity(row, "total_seats", "available_seats"),
        status: row.get("status"),
    }
}

impl<C> Database<Insert<Flight>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(flight): Insert<Flight>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let total = i32::try_from(flight.capacity.total())
            .expect("`total_seats` overflow");
        let available = i32::try_from(flight.capacity.available())
            .expect("`available_seats` overflow");

        const SQL: &str = "\
            INSERT INTO flights (\
                id, number, airline_id, \
                source_city_id, destination_city_id, \
                departure_time, arrival_time, date, \
                economy_price, business_price, price_currency, \
                total_seats, available_seats, status\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, \
                $4::UUID, $5::UUID, \
                $6::TIME, $7::TIME, $8::DATE, \
                $9::NUMERIC, $10::NUMERIC, $11::INT2, \
                $12::INT4, $13::INT4, $14::INT2\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                airline_id = EXCLUDED.airline_id, \
                source_city_id = EXCLUDED.source_city_id, \
                destination_city_id = EXCLUDED.destination_city_id, \
                departure_time = EXCLUDED.departure_time, \
                arrival_time = EXCLUDED.arrival_time, \
                date = EXCLUDED.date, \
                economy_price = EXCLUDED.economy_price, \
                business_price = EXCLUDED.business_price, \
                price_currency = EXCLUDED.price_currency, \
                total_seats = EXCLUDED.total_seats, \
                available_seats = EXCLUDED.available_seats, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &flight.id,
                &flight.number,
                &flight.airline_id,
                &flight.source_city_id,
                &flight.destination_city_id,
                &flight.departure_time,
                &flight.arrival_time,
                &flight.date,
                &flight.economy_price.amount,
                &flight.business_price.map(|p| p.amount),
                &flight.economy_price.currency,
                &total,
                &available,
                &flight.status,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<Flight>, flight::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Flight>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Flight>, flight::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: flight::Id = by.into_inner();

        const SQL: &str = concat!(
            "SELECT ",
            flight_columns!(),
            " FROM flights \
              WHERE id = $1::UUID",
        );
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| flight_from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Flight>, read::flight::Search>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Flight>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Flight>, read::flight::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        // Avoid subtle change for SQL.
        let passengers = i32::from(search.passengers.get());

        const SQL: &str = concat!(
            "SELECT ",
            flight_columns!(),
            " FROM flights \
              WHERE source_city_id = $1::UUID \
                AND destination_city_id = $2::UUID \
                AND date = $3::DATE \
                AND status IN ($4::INT2, $5::INT2) \
                AND available_seats >= $6::INT4 \
              ORDER BY departure_time, number",
        );
        Ok(self
            .query(
                SQL,
                &[
                    &search.source_city_id,
                    &search.destination_city_id,
                    &search.date,
                    &flight::Status::Scheduled,
                    &flight::Status::Delayed,
                    &passengers,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(flight_from_row)
            .collect())
    }
}

/// Expands to the selected columns of the `hotels` table.
macro_rules! hotel_columns {
    () => {
        "id, name, city_id, address, \
         price_per_night, price_currency, star_rating, \
         total_rooms, available_rooms"
    };
}

/// Converts the provided [`Row`] of `hotel_columns!` into a [`Hotel`].
fn hotel_from_row(row: &Row) -> Hotel {
    Hotel {
        id: row.get("id"),
        name: row.get("name"),
        city_id: row.get("city_id"),
        address: row.get("address"),
        price_per_night: Money {
            amount: row.get("price_per_night"),
            currency: row.get("price_currency"),
        },
        star_rating: star_rating(row, "star_rating"),
        capacity: capacity(row, "total_rooms", "available_rooms"),
    }
}

impl<C> Database<Insert<Hotel>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(hotel): Insert<Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let stars = i16::from(u8::from(hotel.star_rating));
        let total = i32::try_from(hotel.capacity.total())
            .expect("`total_rooms` overflow");
        let available = i32::try_from(hotel.capacity.available())
            .expect("`available_rooms` overflow");

        const SQL: &str = "\
            INSERT INTO hotels (\
                id, name, city_id, address, \
                price_per_night, price_currency, star_rating, \
                total_rooms, available_rooms\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::TEXT, \
                $5::NUMERIC, $6::INT2, $7::INT2, \
                $8::INT4, $9::INT4\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                city_id = EXCLUDED.city_id, \
                address = EXCLUDED.address, \
                price_per_night = EXCLUDED.price_per_night, \
                price_currency = EXCLUDED.price_currency, \
                star_rating = EXCLUDED.star_rating, \
                total_rooms = EXCLUDED.total_rooms, \
                available_rooms = EXCLUDED.available_rooms";
        self.exec(
            SQL,
            &[
                &hotel.id,
                &hotel.name,
                &hotel.city_id,
                &hotel.address,
                &hotel.price_per_night.amount,
                &hotel.price_per_night.currency,
                &stars,
                &total,
                &available,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<Hotel>, hotel::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Hotel>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: hotel::Id = by.into_inner();

        const SQL: &str = concat!(
            "SELECT ",
            hotel_columns!(),
            " FROM hotels \
              WHERE id = $1::UUID",
        );
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| hotel_from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Hotel>, read::hotel::Search>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Hotel>, read::hotel::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        // Avoid subtle change for SQL.
        let rooms = i32::from(search.rooms.get());
        let min_rating: Option<i16> =
            search.min_rating.map(|r| i16::from(u8::from(r)));
        let max_price: Option<Decimal> = search.max_price.map(|p| p.amount);
        let currency: Option<money::Currency> =
            search.max_price.map(|p| p.currency);

        const SQL: &str = concat!(
            "SELECT ",
            hotel_columns!(),
            " FROM hotels \
              WHERE city_id = $1::UUID \
                AND available_rooms >= $2::INT4 \
                AND ($3::INT2 IS NULL OR star_rating >= $3::INT2) \
                AND ($4::NUMERIC IS NULL \
                     OR (price_per_night <= $4::NUMERIC \
                         AND price_currency = $5::INT2)) \
              ORDER BY star_rating DESC, price_per_night ASC",
        );
        Ok(self
            .query(
                SQL,
                &[&search.city_id, &rooms, &min_rating, &max_price, &currency],
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(hotel_from_row)
            .collect())
    }
}

impl<C> Database<Insert<Attraction>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(attraction): Insert<Attraction>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO attractions (\
                id, name, city_id, category, description, \
                entry_fee, entry_fee_currency\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::INT2, $5::TEXT, \
                $6::NUMERIC, $7::INT2\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                city_id = EXCLUDED.city_id, \
                category = EXCLUDED.category, \
                description = EXCLUDED.description, \
                entry_fee = EXCLUDED.entry_fee, \
                entry_fee_currency = EXCLUDED.entry_fee_currency";
        self.exec(
            SQL,
            &[
                &attraction.id,
                &attraction.name,
                &attraction.city_id,
                &attraction.category,
                &attraction.description,
                &attraction.entry_fee.map(|f| f.amount),
                &attraction.entry_fee.map(|f| f.currency),
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Attraction>, read::attraction::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attraction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attraction>, read::attraction::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        // Avoid subtle change for SQL.
        let max_fee: Option<Decimal> = filter.max_fee.map(|f| f.amount);
        let currency: Option<money::Currency> =
            filter.max_fee.map(|f| f.currency);

        const SQL: &str = "\
            SELECT a.id, a.name, a.city_id, a.category, a.description, \
                   a.entry_fee, a.entry_fee_currency \
            FROM attractions AS a \
            INNER JOIN cities AS c ON c.id = a.city_id \
            WHERE ($1::UUID IS NULL OR a.city_id = $1::UUID) \
              AND ($2::INT2 IS NULL OR a.category = $2::INT2) \
              AND ($3::NUMERIC IS NULL \
                   OR a.entry_fee IS NULL \
                   OR (a.entry_fee <= $3::NUMERIC \
                       AND a.entry_fee_currency = $4::INT2)) \
            ORDER BY c.name, a.name";
        Ok(self
            .query(
                SQL,
                &[&filter.city_id, &filter.category, &max_fee, &currency],
            )
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Attraction {
                id: row.get("id"),
                name: row.get("name"),
                city_id: row.get("city_id"),
                category: row.get("category"),
                description: row.get("description"),
                entry_fee: row.get::<_, Option<Decimal>>("entry_fee").map(
                    |amount| Money {
                        amount,
                        currency: row.get("entry_fee_currency"),
                    },
                ),
            })
            .collect())
    }
}
