//! [`Command`] for recording a [`Payment`] of a [`Booking`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{booking, payment, user, Booking, Payment},
    infra::{database, Database},
    read::Insertion,
    Service,
};

use super::{insert_with_fresh_key, Command};

/// [`Command`] for recording a [`Payment`] of a pending [`Booking`], which
/// confirms it.
#[derive(Clone, Copy, Debug)]
pub struct RecordPayment {
    /// ID of the [`Booking`] to be paid.
    pub booking_id: booking::Id,

    /// ID of the [`User`] who pays the [`Booking`].
    pub initiator_id: user::Id,

    /// [`payment::Method`] of the [`Payment`].
    pub method: payment::Method,

    /// Paid amount, equal to the total price of the [`Booking`].
    pub amount: Money,
}

impl<Db> Command<RecordPayment> for Service<Db>
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
            Insert<Payment>,
            Ok = Insertion,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayment {
            booking_id,
            initiator_id,
            method,
            amount,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent payments and cancellations.
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
            .confirm()
            .map_err(|_| tracerr::new!(E::InvalidBookingState(booking_id)))?;

        let expected = booking.total_price();
        if amount != expected {
            return Err(tracerr::new!(E::AmountMismatch {
                expected,
                actual: amount,
            }));
        }

        let created_at = payment::CreationDateTime::now();
        let payment = Payment {
            id: payment::Id::new(),
            transaction_id: payment::TransactionId::generate(created_at),
            target: payment::Target::of(&booking),
            amount,
            method,
            status: payment::Status::Completed,
            created_at,
        };
        let payment = insert_with_fresh_key(
            &tx,
            payment,
            self.config().max_reference_attempts,
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?
        .ok_or(E::TransactionIdCollision)
        .map_err(tracerr::wrap!())?;

        tx.execute(Update(booking))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(payment)
    }
}

/// Error of [`RecordPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Paid amount differs from the total price of the [`Booking`].
    #[display("Paid `{actual}` differs from the total price `{expected}`")]
    AmountMismatch {
        /// Total price of the [`Booking`].
        #[error(not(source))]
        expected: Money,

        /// Paid amount.
        actual: Money,
    },

    /// [`Booking`] is a part of a [`booking::Package`], so can only be paid
    /// along with it.
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

    /// [`Booking`] doesn't await a [`Payment`].
    #[display("`Booking(id: {_0})` is not pending")]
    InvalidBookingState(#[error(not(source))] booking::Id),

    /// No free [`payment::TransactionId`] has been generated.
    #[display("Failed to generate a free `payment::TransactionId`")]
    TransactionIdCollision,
}
