//! Availability ledger [`Database`] implementations.

use common::operations::{By, Perform, Select};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::availability::{
        Capacity, Release, Released, Reservation, Reserve, Resource,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::capacity;

/// Returns the [`Resource`] ID as a query parameter.
fn resource_id(resource: &Resource) -> &(dyn ToSql + Sync) {
    match resource {
        Resource::Flight(id) => id,
        Resource::Hotel(id) => id,
    }
}

impl<C> Database<Perform<Reserve>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Capacity>, Resource>>,
        Ok = Option<Capacity>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<Reserve>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let quantity = i32::from(op.quantity.get());

        const FLIGHT_SQL: &str = "\
            UPDATE flights \
            SET available_seats = available_seats - $2::INT4 \
            WHERE id = $1::UUID \
              AND available_seats >= $2::INT4 \
            RETURNING total_seats AS total, available_seats AS available";
        const HOTEL_SQL: &str = "\
            UPDATE hotels \
            SET available_rooms = available_rooms - $2::INT4 \
            WHERE id = $1::UUID \
              AND available_rooms >= $2::INT4 \
            RETURNING total_rooms AS total, available_rooms AS available";
        let sql = match op.resource {
            Resource::Flight(_) => FLIGHT_SQL,
            Resource::Hotel(_) => HOTEL_SQL,
        };
        if let Some(row) = self
            .query_opt(sql, &[resource_id(&op.resource), &quantity])
            .await
            .map_err(tracerr::wrap!())?
        {
            return Ok(Some(Reservation::Reserved(capacity(
                &row,
                "total",
                "available",
            ))));
        }

        // Guard prevented the update, so tell a missing `Resource` apart
        // from a short one.
        Ok(self
            .execute(Select(By::<Option<Capacity>, _>::new(op.resource)))
            .await
            .map_err(tracerr::wrap!())?
            .map(Reservation::Insufficient))
    }
}

impl<C> Database<Perform<Release>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Released>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<Release>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let quantity = i32::from(op.quantity.get());

        const FLIGHT_SQL: &str = "\
            WITH old AS (\
                SELECT id, available_seats \
                FROM flights \
                WHERE id = $1::UUID \
                FOR UPDATE\
            ) \
            UPDATE flights AS f \
            SET available_seats = \
                    LEAST(f.available_seats + $2::INT4, f.total_seats) \
            FROM old \
            WHERE f.id = old.id \
            RETURNING f.total_seats AS total, \
                      f.available_seats AS available, \
                      old.available_seats AS previous";
        const HOTEL_SQL: &str = "\
            WITH old AS (\
                SELECT id, available_rooms \
                FROM hotels \
                WHERE id = $1::UUID \
                FOR UPDATE\
            ) \
            UPDATE hotels AS h \
            SET available_rooms = \
                    LEAST(h.available_rooms + $2::INT4, h.total_rooms) \
            FROM old \
            WHERE h.id = old.id \
            RETURNING h.total_rooms AS total, \
                      h.available_rooms AS available, \
                      old.available_rooms AS previous";
        let sql = match op.resource {
            Resource::Flight(_) => FLIGHT_SQL,
            Resource::Hotel(_) => HOTEL_SQL,
        };
        Ok(self
            .query_opt(sql, &[resource_id(&op.resource), &quantity])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| {
                let capacity = capacity(&row, "total", "available");
                let previous = row.get::<_, i32>("previous");
                let overflow = u32::try_from(
                    i64::from(previous) + i64::from(quantity)
                        - i64::from(capacity.available()),
                )
                .expect("`overflow` is never negative");
                Released { capacity, overflow }
            }))
    }
}

impl<C> Database<Select<By<Option<Capacity>, Resource>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Capacity>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Capacity>, Resource>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let resource: Resource = by.into_inner();

        const FLIGHT_SQL: &str = "\
            SELECT total_seats AS total, available_seats AS available \
            FROM flights \
            WHERE id = $1::UUID";
        const HOTEL_SQL: &str = "\
            SELECT total_rooms AS total, available_rooms AS available \
            FROM hotels \
            WHERE id = $1::UUID";
        let sql = match resource {
            Resource::Flight(_) => FLIGHT_SQL,
            Resource::Hotel(_) => HOTEL_SQL,
        };
        Ok(self
            .query_opt(sql, &[resource_id(&resource)])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| capacity(&row, "total", "available")))
    }
}
