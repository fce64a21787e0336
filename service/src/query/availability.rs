//! [`Query`] collection related to the availability of [`Resource`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        availability::{Quantity, Resource},
        flight, hotel, Flight, Hotel,
    },
    infra::{database, Database},
    read::availability::Snapshot,
    Query, Service,
};

/// [`Query`] checking whether a [`Quantity`] of a [`Resource`] is available.
///
/// The result is advisory only: booking re-validates the availability.
#[derive(Clone, Copy, Debug)]
pub struct Check {
    /// [`Resource`] to check.
    pub resource: Resource,

    /// [`Quantity`] of units to check.
    pub quantity: Quantity,
}

impl<Db> Query<Check> for Service<Db>
where
    Db: Database<
            Select<By<Option<Flight>, flight::Id>>,
            Ok = Option<Flight>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<Snapshot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Check { resource, quantity }: Check,
    ) -> Result<Self::Ok, Self::Err> {
        let found = match resource {
            Resource::Flight(id) => self
                .database()
                .execute(Select(By::<Option<Flight>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?
                .map(|f| (f.capacity, f.economy_price)),
            Resource::Hotel(id) => self
                .database()
                .execute(Select(By::<Option<Hotel>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?
                .map(|h| (h.capacity, h.price_per_night)),
        };
        Ok(found.map(|(capacity, unit_price)| Snapshot {
            available: capacity.fits(quantity),
            remaining: capacity.available(),
            unit_price,
        }))
    }
}
