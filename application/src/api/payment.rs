//! [`Payment`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A payment of a `Booking`.
#[derive(Clone, Debug, From)]
pub struct Payment(domain::Payment);

/// A payment of a `Booking`.
#[graphql_object(context = Context)]
impl Payment {
    /// Unique identifier of this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Transaction identifier of this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.transactionId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn transaction_id(&self) -> TransactionId {
        self.0.transaction_id.clone().into()
    }

    /// ID of the `Booking` paid by this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.bookingId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn booking_id(&self) -> api::booking::Id {
        self.0.target.booking_id().into()
    }

    /// Paid amount.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.amount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Method of this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.method",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn method(&self) -> Method {
        self.0.method.into()
    }

    /// Status of this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `Payment` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Payment`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::payment::Id)]
#[into(domain::payment::Id)]
#[graphql(name = "PaymentId", transparent)]
pub struct Id(Uuid);

/// Transaction identifier of a `Payment`, like `TXN2024010409300012AB34CD`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PaymentTransactionId",
    with = scalar::Via::<domain::payment::TransactionId>,
)]
pub struct TransactionId(domain::payment::TransactionId);

/// Method of a `Payment`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PaymentMethod")]
pub enum Method {
    /// Credit card.
    CreditCard,

    /// Debit card.
    DebitCard,

    /// PayPal.
    Paypal,

    /// Bank transfer.
    BankTransfer,
}

impl From<domain::payment::Method> for Method {
    fn from(method: domain::payment::Method) -> Self {
        use domain::payment::Method as M;
        match method {
            M::CreditCard => Self::CreditCard,
            M::DebitCard => Self::DebitCard,
            M::Paypal => Self::Paypal,
            M::BankTransfer => Self::BankTransfer,
        }
    }
}

impl From<Method> for domain::payment::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::CreditCard => Self::CreditCard,
            Method::DebitCard => Self::DebitCard,
            Method::Paypal => Self::Paypal,
            Method::BankTransfer => Self::BankTransfer,
        }
    }
}

/// Status of a `Payment`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PaymentStatus")]
pub enum Status {
    /// Initiated.
    Pending,

    /// Being processed.
    Processing,

    /// Done.
    Completed,

    /// Failed.
    Failed,

    /// Returned back.
    Refunded,
}

impl From<domain::payment::Status> for Status {
    fn from(status: domain::payment::Status) -> Self {
        use domain::payment::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Processing => Self::Processing,
            S::Completed => Self::Completed,
            S::Failed => Self::Failed,
            S::Refunded => Self::Refunded,
        }
    }
}
