//! [`Command`] for cancelling a [`Booking`].

use common::operations::{
    By, Commit, Lock, Perform, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        availability::{Release, Released, Resource},
        booking::{self, CancelError},
        user, Booking,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`Booking`] and releasing everything it
/// holds.
#[derive(Clone, Copy, Debug)]
pub struct CancelBooking {
    /// ID of the [`Booking`] to be cancelled.
    pub booking_id: booking::Id,

    /// ID of the [`User`] who cancels the [`Booking`].
    pub initiator_id: user::Id,
}

impl<Db> Command<CancelBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Perform<Release>,
            Ok = Option<Released>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CancelBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelBooking {
            booking_id,
            initiator_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent cancellations and payments.
        tx.execute(Lock(By::<Booking, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|b| b.user_id() == initiator_id)
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        if let Some(package_id) = booking.package_id() {
            return Err(tracerr::new!(E::BookingInPackage {
                booking_id,
                package_id,
            }));
        }

        booking
            .cancel()
            .map_err(|e| match e {
                CancelError::AlreadyCancelled => {
                    E::AlreadyCancelled(booking_id)
                }
                CancelError::NotCancellable => E::NotCancellable(booking_id),
            })
            .map_err(tracerr::wrap!())?;

        for (resource, quantity) in booking.holdings() {
            let Released { capacity, overflow } = tx
                .execute(Perform(Release { resource, quantity }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ResourceNotExists(resource))
                .map_err(tracerr::wrap!())?;
            if overflow > 0 {
                log::warn!(
                    "cancelling `Booking(id: {booking_id})` overflowed \
                     `{resource}` total of {} by {overflow} units",
                    capacity.total(),
                );
            }
        }

        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`CancelBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] is cancelled already.
    #[display("`Booking(id: {_0})` is already cancelled")]
    AlreadyCancelled(#[error(not(source))] booking::Id),

    /// [`Booking`] is a part of a [`booking::Package`], so can only be
    /// cancelled along with it.
    #[display(
        "`Booking(id: {booking_id})` is a part of \
         `Package(id: {package_id})`"
    )]
    BookingInPackage {
        /// ID of the sub-[`Booking`].
        #[error(not(source))]
        booking_id: booking::Id,

        /// ID of the [`booking::Package`] owning the sub-[`Booking`].
        package_id: booking::Id,
    },

    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] has been used already.
    #[display("`Booking(id: {_0})` cannot be cancelled anymore")]
    NotCancellable(#[error(not(source))] booking::Id),

    /// [`Resource`] held by the [`Booking`] does not exist.
    #[display("`{_0}` does not exist")]
    ResourceNotExists(#[error(not(source))] Resource),
}
