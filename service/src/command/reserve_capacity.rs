//! [`Command`] for reserving units of a [`Resource`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::availability::{
        Capacity, Quantity, Reservation, Reserve, Resource,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for reserving units of a [`Resource`].
#[derive(Clone, Copy, Debug)]
pub struct ReserveCapacity {
    /// [`Resource`] to reserve units of.
    pub resource: Resource,

    /// [`Quantity`] of units to reserve.
    pub quantity: Quantity,
}

impl<Db> Command<ReserveCapacity> for Service<Db>
where
    Db: Database<
        Perform<Reserve>,
        Ok = Option<Reservation>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Capacity;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReserveCapacity,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReserveCapacity { resource, quantity } = cmd;

        let reservation = self
            .database()
            .execute(Perform(Reserve { resource, quantity }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ResourceNotExists(resource))
            .map_err(tracerr::wrap!())?;
        match reservation {
            Reservation::Reserved(capacity) => Ok(capacity),
            Reservation::Insufficient(capacity) => {
                Err(tracerr::new!(E::InsufficientCapacity {
                    resource,
                    available: capacity.available(),
                }))
            }
        }
    }
}

/// Error of [`ReserveCapacity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Resource`] has not enough units left.
    #[display("`{resource}` has only {available} units left")]
    InsufficientCapacity {
        /// [`Resource`] being reserved.
        #[error(not(source))]
        resource: Resource,

        /// Number of units left.
        available: u32,
    },

    /// [`Resource`] does not exist.
    #[display("`{_0}` does not exist")]
    ResourceNotExists(#[error(not(source))] Resource),
}
