//! Availability ledger [`Database`] implementations.

use common::operations::{By, Perform, Select};
use tracerr::Traced;

use crate::{
    domain::availability::{
        Capacity, Release, Released, Reservation, Reserve, Resource,
    },
    infra::{
        database::{
            self,
            memory::{Access, Storage},
            Memory,
        },
        Database,
    },
};

impl Storage {
    /// Returns the [`Capacity`] of the provided [`Resource`] for modifying.
    fn capacity_mut(&mut self, resource: Resource) -> Option<&mut Capacity> {
        match resource {
            Resource::Flight(id) => {
                self.flights.get_mut(&id).map(|f| &mut f.capacity)
            }
            Resource::Hotel(id) => {
                self.hotels.get_mut(&id).map(|h| &mut h.capacity)
            }
        }
    }
}

impl<A: Access> Database<Perform<Reserve>> for Memory<A> {
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<Reserve>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                let capacity = s.capacity_mut(op.resource)?;
                Some(match capacity.reserve(op.quantity) {
                    Ok(reserved) => {
                        *capacity = reserved;
                        Reservation::Reserved(reserved)
                    }
                    Err(current) => Reservation::Insufficient(current),
                })
            })
            .await)
    }
}

impl<A: Access> Database<Perform<Release>> for Memory<A> {
    type Ok = Option<Released>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<Release>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                let capacity = s.capacity_mut(op.resource)?;
                let (released, overflow) = capacity.release(op.quantity);
                *capacity = released;
                Some(Released {
                    capacity: released,
                    overflow,
                })
            })
            .await)
    }
}

impl<A: Access> Database<Select<By<Option<Capacity>, Resource>>>
    for Memory<A>
{
    type Ok = Option<Capacity>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Capacity>, Resource>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .read(|s| match by.into_inner() {
                Resource::Flight(id) => s.flights.get(&id).map(|f| f.capacity),
                Resource::Hotel(id) => s.hotels.get(&id).map(|h| h.capacity),
            })
            .await)
    }
}
