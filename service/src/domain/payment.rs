//! [`Payment`] definitions.

use std::{fmt::Write as _, sync::LazyLock};

use common::{define_kind, unit, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking;
#[cfg(doc)]
use crate::domain::Booking;

/// Payment of a [`Booking`].
#[derive(Clone, Debug)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// [`TransactionId`] of this [`Payment`].
    pub transaction_id: TransactionId,

    /// [`Target`] being paid by this [`Payment`].
    pub target: Target,

    /// Paid amount.
    pub amount: Money,

    /// [`Method`] of this [`Payment`].
    pub method: Method,

    /// [`Status`] of this [`Payment`].
    pub status: Status,

    /// [`DateTime`] when this [`Payment`] was created.
    pub created_at: CreationDateTime,
}

/// [`Booking`] paid by a [`Payment`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Target {
    /// [`booking::Flight`] is paid.
    #[display("Flight(id: {_0})")]
    Flight(booking::Id),

    /// [`booking::Hotel`] is paid.
    #[display("Hotel(id: {_0})")]
    Hotel(booking::Id),

    /// [`booking::Package`] is paid.
    #[display("Package(id: {_0})")]
    Package(booking::Id),
}

impl Target {
    /// Creates a new [`Target`] for the provided [`Booking`].
    #[must_use]
    pub fn of(booking: &booking::Booking) -> Self {
        let id = booking.id();
        match booking.kind() {
            booking::Kind::Flight => Self::Flight(id),
            booking::Kind::Hotel => Self::Hotel(id),
            booking::Kind::Package => Self::Package(id),
        }
    }

    /// Returns ID of the paid [`Booking`].
    #[must_use]
    pub fn booking_id(&self) -> booking::Id {
        match self {
            Self::Flight(id) | Self::Hotel(id) | Self::Package(id) => *id,
        }
    }

    /// Returns [`booking::Kind`] of the paid [`Booking`].
    #[must_use]
    pub fn kind(&self) -> booking::Kind {
        match self {
            Self::Flight(_) => booking::Kind::Flight,
            Self::Hotel(_) => booking::Kind::Hotel,
            Self::Package(_) => booking::Kind::Package,
        }
    }
}

/// ID of a [`Payment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Unique identifier of a [`Payment`] transaction.
///
/// Formatted as `TXN{YYYYmmddHHMMSS}{8 uppercase hex digits}`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a new [`TransactionId`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`TransactionId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Generates a new random [`TransactionId`] issued at the provided
    /// [`DateTime`].
    #[must_use]
    pub fn generate<Of: ?Sized>(at: DateTimeOf<Of>) -> Self {
        let at = time::OffsetDateTime::from(at);
        let mut id = format!(
            "TXN{:04}{:02}{:02}{:02}{:02}{:02}",
            at.year(),
            u8::from(at.month()),
            at.day(),
            at.hour(),
            at.minute(),
            at.second(),
        );
        for b in &Uuid::new_v4().as_bytes()[..4] {
            _ = write!(id, "{b:02X}");
        }
        Self(id)
    }

    /// Checks whether the given `id` is a valid [`TransactionId`].
    fn check(id: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^TXN[0-9]{14}[0-9A-F]{8}$").expect("valid regex")
        });

        REGEX.is_match(id.as_ref())
    }
}

impl FromStr for TransactionId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Payment` transaction ID")
    }
}

define_kind! {
    #[doc = "Method of a [`Payment`]."]
    enum Method {
        #[doc = "Credit card."]
        CreditCard = 1,

        #[doc = "Debit card."]
        DebitCard = 2,

        #[doc = "PayPal."]
        Paypal = 3,

        #[doc = "Bank transfer."]
        BankTransfer = 4,
    }
}

define_kind! {
    #[doc = "Status of a [`Payment`]."]
    enum Status {
        #[doc = "[`Payment`] is initiated."]
        Pending = 1,

        #[doc = "[`Payment`] is being processed."]
        Processing = 2,

        #[doc = "[`Payment`] is done."]
        Completed = 3,

        #[doc = "[`Payment`] has failed."]
        Failed = 4,

        #[doc = "[`Payment`] is returned back."]
        Refunded = 5,
    }
}

/// [`DateTime`] when a [`Payment`] was created.
pub type CreationDateTime = DateTimeOf<(Payment, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::TransactionId;

    #[test]
    fn generates_transaction_id() {
        let at = DateTime::from_rfc3339("2024-03-07T09:05:01Z").unwrap();

        let id = TransactionId::generate(at);

        assert!(AsRef::<str>::as_ref(&id).starts_with("TXN20240307090501"), "{id}");
        assert_eq!(AsRef::<str>::as_ref(&id).len(), 25, "{id}");
        assert!(TransactionId::new(id.to_string()).is_some(), "{id}");
    }

    #[test]
    fn transaction_id() {
        assert!(TransactionId::new("TXN20240307090501ABCDEF01").is_some());

        assert!(TransactionId::new("TXN20240307090501abcdef01").is_none());
        assert!(TransactionId::new("TXN2024030709050ABCDEF01").is_none());
        assert!(TransactionId::new("PAY20240307090501ABCDEF01").is_none());
    }
}
