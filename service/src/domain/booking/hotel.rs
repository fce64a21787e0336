//! [`Hotel`] booking definitions.

use std::num::NonZeroU16;

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{
    availability::{Quantity, Resource},
    hotel, user,
};
#[cfg(doc)]
use crate::domain::{Booking, User};

use super::{CancelError, CreationDateTime, Id, NotPending, Reference};
#[cfg(doc)]
use super::Package;

/// [`Booking`] of rooms in a [`hotel::Hotel`].
#[derive(Clone, Debug)]
pub struct Hotel {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`Reference`] of this [`Booking`].
    pub reference: Reference,

    /// ID of the [`User`] owning this [`Booking`].
    pub user_id: user::Id,

    /// ID of the booked [`hotel::Hotel`].
    pub hotel_id: hotel::Id,

    /// [`Date`] of arrival.
    pub check_in: Date,

    /// [`Date`] of departure, always after the [`Hotel::check_in`].
    pub check_out: Date,

    /// [`RoomsCount`] of this [`Booking`].
    pub rooms_count: RoomsCount,

    /// [`GuestsCount`] of this [`Booking`].
    pub guests_count: GuestsCount,

    /// [`SpecialRequests`] of the guests, if any.
    pub special_requests: Option<SpecialRequests>,

    /// Total price of this [`Booking`].
    pub total_price: Money,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// ID of the [`Package`] this [`Booking`] is a part of, if any.
    pub package_id: Option<Id>,

    /// [`DateTime`] when this [`Booking`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

impl Hotel {
    /// Confirms this [`Booking`].
    ///
    /// # Errors
    ///
    /// With [`NotPending`] if this [`Booking`] is not [`Status::Pending`].
    pub fn confirm(&mut self) -> Result<(), NotPending> {
        if self.status != Status::Pending {
            return Err(NotPending);
        }
        self.status = Status::Confirmed;
        Ok(())
    }

    /// Cancels this [`Booking`].
    ///
    /// # Errors
    ///
    /// If this [`Booking`] is cancelled or used already.
    pub fn cancel(&mut self) -> Result<(), CancelError> {
        match self.status {
            Status::Pending | Status::Confirmed => {
                self.status = Status::Cancelled;
                Ok(())
            }
            Status::Cancelled => Err(CancelError::AlreadyCancelled),
            Status::CheckedIn | Status::CheckedOut => {
                Err(CancelError::NotCancellable)
            }
        }
    }

    /// Returns the rooms held by this [`Booking`].
    #[must_use]
    pub fn holding(&self) -> (Resource, Quantity) {
        (Resource::Hotel(self.hotel_id), self.rooms_count.quantity())
    }

    /// Returns the number of nights of this [`Booking`].
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.check_in.days_until(self.check_out)
    }
}

/// Number of rooms in a hotel [`Booking`], from 1 to 5.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct RoomsCount(u16);

impl RoomsCount {
    /// Maximum [`RoomsCount`] of a single [`Booking`].
    pub const MAX: Self = Self(5);

    /// Creates a new [`RoomsCount`] if the given `count` is in range.
    #[must_use]
    pub fn new(count: impl TryInto<u16>) -> Option<Self> {
        let count = count.try_into().ok()?;
        (1..=Self::MAX.0).contains(&count).then_some(Self(count))
    }

    /// Returns the number of rooms.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the [`Quantity`] of rooms to reserve.
    #[must_use]
    pub fn quantity(self) -> Quantity {
        Quantity::from(NonZeroU16::MIN.saturating_add(self.0 - 1))
    }
}

/// Number of guests in a hotel [`Booking`], from 1 to 10.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct GuestsCount(u16);

impl GuestsCount {
    /// Maximum [`GuestsCount`] of a single [`Booking`].
    pub const MAX: Self = Self(10);

    /// Creates a new [`GuestsCount`] if the given `count` is in range.
    #[must_use]
    pub fn new(count: impl TryInto<u16>) -> Option<Self> {
        let count = count.try_into().ok()?;
        (1..=Self::MAX.0).contains(&count).then_some(Self(count))
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Free-form special requests of the guests.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct SpecialRequests(String);

impl SpecialRequests {
    /// Maximum length of [`SpecialRequests`].
    pub const MAX_LEN: usize = 1000;

    /// Creates new [`SpecialRequests`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` is not too long.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates new [`SpecialRequests`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is valid [`SpecialRequests`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for SpecialRequests {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid special requests")
    }
}

define_kind! {
    #[doc = "Status of a hotel [`Booking`]."]
    enum Status {
        #[doc = "[`Booking`] awaits its payment."]
        Pending = 1,

        #[doc = "[`Booking`] is paid."]
        Confirmed = 2,

        #[doc = "[`Booking`] is cancelled."]
        Cancelled = 3,

        #[doc = "Guests have arrived."]
        CheckedIn = 4,

        #[doc = "Guests have left."]
        CheckedOut = 5,
    }
}

#[cfg(test)]
mod spec {
    use super::{GuestsCount, RoomsCount, SpecialRequests};

    #[test]
    fn counts() {
        assert!(RoomsCount::new(1).is_some());
        assert!(RoomsCount::new(5).is_some());
        assert!(RoomsCount::new(0).is_none());
        assert!(RoomsCount::new(6).is_none());

        assert!(GuestsCount::new(1).is_some());
        assert!(GuestsCount::new(10).is_some());
        assert!(GuestsCount::new(0).is_none());
        assert!(GuestsCount::new(11).is_none());
    }

    #[test]
    fn special_requests() {
        assert!(SpecialRequests::new("Late check-in, please").is_some());
        assert!(SpecialRequests::new("x".repeat(1000)).is_some());

        assert!(SpecialRequests::new("").is_none());
        assert!(SpecialRequests::new("   ").is_none());
        assert!(SpecialRequests::new("x".repeat(1001)).is_none());
    }
}
