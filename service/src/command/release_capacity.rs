//! [`Command`] for releasing units of a [`Resource`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::availability::{Capacity, Quantity, Release, Released, Resource},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for releasing previously reserved units of a [`Resource`].
#[derive(Clone, Copy, Debug)]
pub struct ReleaseCapacity {
    /// [`Resource`] to release units of.
    pub resource: Resource,

    /// [`Quantity`] of units to release.
    pub quantity: Quantity,
}

impl<Db> Command<ReleaseCapacity> for Service<Db>
where
    Db: Database<
        Perform<Release>,
        Ok = Option<Released>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Capacity;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReleaseCapacity,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReleaseCapacity { resource, quantity } = cmd;

        let Released { capacity, overflow } = self
            .database()
            .execute(Perform(Release { resource, quantity }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ResourceNotExists(resource))
            .map_err(tracerr::wrap!())?;
        if overflow > 0 {
            log::warn!(
                "releasing {quantity} units of `{resource}` overflowed its \
                 total of {} by {overflow} units",
                capacity.total(),
            );
        }
        Ok(capacity)
    }
}

/// Error of [`ReleaseCapacity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Resource`] does not exist.
    #[display("`{_0}` does not exist")]
    ResourceNotExists(#[error(not(source))] Resource),
}
