//! [`Booking`] definitions.

pub mod flight;
pub mod hotel;
pub mod package;

use std::sync::LazyLock;

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    availability::{Quantity, Resource},
    user,
};
#[cfg(doc)]
use crate::domain::{Payment, User};

pub use self::{flight::Flight, hotel::Hotel, package::Package};

/// Booking of a flight, a hotel, or both of them as a package.
#[derive(Clone, Debug, From)]
pub enum Booking {
    #[doc(hidden)]
    Flight(Flight),
    #[doc(hidden)]
    Hotel(Hotel),
    #[doc(hidden)]
    Package(Package),
}

impl Booking {
    /// Returns ID of this [`Booking`].
    #[must_use]
    pub fn id(&self) -> Id {
        match self {
            Self::Flight(b) => b.id,
            Self::Hotel(b) => b.id,
            Self::Package(b) => b.id,
        }
    }

    /// Returns [`Kind`] of this [`Booking`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Flight(_) => Kind::Flight,
            Self::Hotel(_) => Kind::Hotel,
            Self::Package(_) => Kind::Package,
        }
    }

    /// Returns [`Reference`] of this [`Booking`].
    #[must_use]
    pub fn reference(&self) -> &Reference {
        match self {
            Self::Flight(b) => &b.reference,
            Self::Hotel(b) => &b.reference,
            Self::Package(b) => &b.reference,
        }
    }

    /// Returns ID of the [`User`] owning this [`Booking`].
    #[must_use]
    pub fn user_id(&self) -> user::Id {
        match self {
            Self::Flight(b) => b.user_id,
            Self::Hotel(b) => b.user_id,
            Self::Package(b) => b.user_id,
        }
    }

    /// Returns the total price of this [`Booking`].
    #[must_use]
    pub fn total_price(&self) -> Money {
        match self {
            Self::Flight(b) => b.total_price,
            Self::Hotel(b) => b.total_price,
            Self::Package(b) => b.total_price,
        }
    }

    /// Returns ID of the [`Package`] this [`Booking`] is a part of, if any.
    #[must_use]
    pub fn package_id(&self) -> Option<Id> {
        match self {
            Self::Flight(b) => b.package_id,
            Self::Hotel(b) => b.package_id,
            Self::Package(_) => None,
        }
    }

    /// Returns [`DateTime`] when this [`Booking`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    #[must_use]
    pub fn created_at(&self) -> CreationDateTime {
        match self {
            Self::Flight(b) => b.created_at,
            Self::Hotel(b) => b.created_at,
            Self::Package(b) => b.created_at,
        }
    }

    /// Checks whether this [`Booking`] awaits its [`Payment`].
    #[must_use]
    pub fn is_pending(&self) -> bool {
        match self {
            Self::Flight(b) => b.status == flight::Status::Pending,
            Self::Hotel(b) => b.status == hotel::Status::Pending,
            Self::Package(b) => b.status == package::Status::Pending,
        }
    }

    /// Confirms this [`Booking`] once its [`Payment`] is recorded.
    ///
    /// # Errors
    ///
    /// With [`NotPending`] if this [`Booking`] doesn't await a [`Payment`].
    pub fn confirm(&mut self) -> Result<(), NotPending> {
        match self {
            Self::Flight(b) => b.confirm(),
            Self::Hotel(b) => b.confirm(),
            Self::Package(b) => b.confirm(),
        }
    }

    /// Cancels this [`Booking`].
    ///
    /// # Errors
    ///
    /// - With [`CancelError::AlreadyCancelled`] if this [`Booking`] is
    ///   cancelled already.
    /// - With [`CancelError::NotCancellable`] if this [`Booking`] has been
    ///   used already.
    pub fn cancel(&mut self) -> Result<(), CancelError> {
        match self {
            Self::Flight(b) => b.cancel(),
            Self::Hotel(b) => b.cancel(),
            Self::Package(b) => b.cancel(),
        }
    }

    /// Returns the [`Resource`]s units held by this [`Booking`], to be released
    /// on its cancellation.
    #[must_use]
    pub fn holdings(&self) -> Vec<(Resource, Quantity)> {
        match self {
            Self::Flight(b) => vec![b.holding()],
            Self::Hotel(b) => vec![b.holding()],
            Self::Package(b) => vec![b.flight.holding(), b.hotel.holding()],
        }
    }
}

/// ID of a [`Booking`].
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

/// Human-readable reference of a [`Booking`], unique across all the
/// [`Booking`] kinds.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Reference(String);

impl Reference {
    /// Length of a [`Reference`].
    pub const LEN: usize = 10;

    /// Creates a new [`Reference`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reference` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Creates a new [`Reference`] if the given `reference` is valid.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        Self::check(&reference).then_some(Self(reference))
    }

    /// Generates a new random [`Reference`].
    #[must_use]
    pub fn generate() -> Self {
        let mut reference = Uuid::new_v4().simple().to_string();
        reference.truncate(Self::LEN);
        reference.make_ascii_uppercase();
        Self(reference)
    }

    /// Checks whether the given `reference` is a valid [`Reference`].
    fn check(reference: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[0-9A-Z]{10}$").expect("valid regex")
        });

        REGEX.is_match(reference.as_ref())
    }
}

impl FromStr for Reference {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Booking` reference")
    }
}

define_kind! {
    #[doc = "Kind of a [`Booking`]."]
    enum Kind {
        #[doc = "[`Flight`] [`Booking`]."]
        Flight = 1,

        #[doc = "[`Hotel`] [`Booking`]."]
        Hotel = 2,

        #[doc = "[`Package`] [`Booking`]."]
        Package = 3,
    }
}

/// [`DateTime`] when a [`Booking`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

/// Error of confirming a [`Booking`] which doesn't await a [`Payment`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("`Booking` is not pending")]
pub struct NotPending;

/// Error of cancelling a [`Booking`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum CancelError {
    /// [`Booking`] is cancelled already.
    #[display("`Booking` is cancelled already")]
    AlreadyCancelled,

    /// [`Booking`] has been used already.
    #[display("`Booking` cannot be cancelled anymore")]
    NotCancellable,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Reference;

    #[test]
    fn reference() {
        for valid in ["ABCDEF1234", "0000000000", "ZZZZZZZZZZ"] {
            assert!(Reference::from_str(valid).is_ok(), "`{valid}` is invalid");
        }
        for invalid in
            ["", "ABCDEF123", "ABCDEF12345", "abcdef1234", "ABCDE-1234"]
        {
            assert!(
                Reference::from_str(invalid).is_err(),
                "`{invalid}` is valid",
            );
        }
    }

    #[test]
    fn generates_valid_reference() {
        for _ in 0..100 {
            let generated = Reference::generate();

            assert!(
                Reference::new(generated.to_string()).is_some(),
                "`{generated}` is invalid",
            );
        }
    }
}
