//! [`CompletePastBookings`] [`Task`].

use std::{convert::Infallible, error::Error, time::Duration};

use common::{
    operations::{By, Perform, Start, Update},
    Date,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    infra::{database, Database},
    read, Service,
};

use super::Task;

/// Configuration for [`CompletePastBookings`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between passes over confirmed [`Booking`]s.
    pub interval: Duration,
}

/// [`Task`] completing confirmed [`Booking`]s whose travel date has passed.
#[derive(Clone, Copy, Debug)]
pub struct CompletePastBookings<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<S> CompletePastBookings<S> {
    /// Creates a new [`CompletePastBookings`] [`Task`] of the provided
    /// [`Service`].
    #[must_use]
    pub fn new(config: Config, service: S) -> Self {
        Self { config, service }
    }
}

impl<Db> Task<Start<By<CompletePastBookings<Self>, Config>>> for Service<Db>
where
    CompletePastBookings<Service<Db>>: Task<
            Perform<()>,
            Ok = read::booking::CompletedCount,
            Err: Error,
        > + Send
        + Sync
        + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CompletePastBookings<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CompletePastBookings::new(config, self.clone());

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            match task.execute(Perform(())).await {
                Ok(count) if u64::from(count) > 0 => {
                    log::info!(
                        "`task::CompletePastBookings` completed {count} \
                         bookings",
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("`task::CompletePastBookings` failed: {e}");
                }
            }
        }
    }
}

impl<Db> Task<Perform<()>> for CompletePastBookings<Service<Db>>
where
    Db: Database<
        Update<By<read::booking::CompletedCount, Date>>,
        Ok = read::booking::CompletedCount,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::booking::CompletedCount;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        self.service
            .database()
            .execute(Update(By::new(Date::today())))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CompletePastBookings`] execution.
pub type ExecutionError = Traced<database::Error>;

