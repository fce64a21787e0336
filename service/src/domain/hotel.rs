//! [`Hotel`] definitions.

use common::{Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{availability, booking, city};
#[cfg(doc)]
use crate::domain::City;

/// Hotel located in a [`City`].
#[derive(Clone, Debug)]
pub struct Hotel {
    /// ID of this [`Hotel`].
    pub id: Id,

    /// [`Name`] of this [`Hotel`].
    pub name: Name,

    /// ID of the [`City`] this [`Hotel`] is located in.
    pub city_id: city::Id,

    /// [`Address`] of this [`Hotel`].
    pub address: Address,

    /// Price of a single room for a single night.
    pub price_per_night: Money,

    /// [`StarRating`] of this [`Hotel`].
    pub star_rating: StarRating,

    /// Rooms [`Capacity`] of this [`Hotel`].
    ///
    /// [`Capacity`]: availability::Capacity
    pub capacity: availability::Capacity,
}

/// ID of a [`Hotel`].
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

/// Name of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 200
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Hotel` name")
    }
}

/// Postal address of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty()
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Hotel` address")
    }
}

/// Star rating of a [`Hotel`], from 1 to 5.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct StarRating(u8);

impl StarRating {
    /// Highest possible [`StarRating`].
    pub const MAX: Self = Self(5);

    /// Creates a new [`StarRating`] if the given `stars` are in range.
    #[must_use]
    pub fn new(stars: impl TryInto<u8>) -> Option<Self> {
        let stars = stars.try_into().ok()?;
        (1..=Self::MAX.0).contains(&stars).then_some(Self(stars))
    }
}

/// Order of [`Hotel`] rooms.
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of the [`Hotel`] to book.
    pub hotel_id: Id,

    /// [`Date`] of arrival.
    pub check_in: Date,

    /// [`Date`] of departure.
    pub check_out: Date,

    /// Number of rooms to book.
    pub rooms_count: booking::hotel::RoomsCount,

    /// Number of guests staying.
    pub guests_count: booking::hotel::GuestsCount,

    /// Special requests of the guests, if any.
    pub special_requests: Option<booking::hotel::SpecialRequests>,
}

#[cfg(test)]
mod spec {
    use super::StarRating;

    #[test]
    fn star_rating() {
        for valid in 1..=5 {
            assert!(StarRating::new(valid).is_some(), "`{valid}` is invalid");
        }
        for invalid in [0, 6, -1, 255] {
            assert!(StarRating::new(invalid).is_none(), "`{invalid}` is valid");
        }
    }
}
