//! [`Flight`] booking definitions.

use std::num::NonZeroU16;

use common::{define_kind, Money};
use derive_more::{Display, Into};

use crate::domain::{
    availability::{Quantity, Resource},
    flight::{self, TravelClass},
    user,
};
#[cfg(doc)]
use crate::domain::{Booking, User};

use super::{CancelError, CreationDateTime, Id, NotPending, Reference};
#[cfg(doc)]
use super::Package;

/// [`Booking`] of seats on a [`flight::Flight`].
#[derive(Clone, Debug)]
pub struct Flight {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`Reference`] of this [`Booking`].
    pub reference: Reference,

    /// ID of the [`User`] owning this [`Booking`].
    pub user_id: user::Id,

    /// ID of the booked [`flight::Flight`].
    pub flight_id: flight::Id,

    /// [`PassengerCount`] of this [`Booking`].
    pub passenger_count: PassengerCount,

    /// [`TravelClass`] of the booked seats.
    pub travel_class: TravelClass,

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

impl Flight {
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
    /// If this [`Booking`] is cancelled or completed already.
    pub fn cancel(&mut self) -> Result<(), CancelError> {
        match self.status {
            Status::Pending | Status::Confirmed => {
                self.status = Status::Cancelled;
                Ok(())
            }
            Status::Cancelled => Err(CancelError::AlreadyCancelled),
            Status::Completed => Err(CancelError::NotCancellable),
        }
    }

    /// Returns the seats held by this [`Booking`].
    #[must_use]
    pub fn holding(&self) -> (Resource, Quantity) {
        (
            Resource::Flight(self.flight_id),
            self.passenger_count.quantity(),
        )
    }
}

/// Number of passengers in a flight [`Booking`], from 1 to 10.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct PassengerCount(u16);

impl PassengerCount {
    /// Maximum [`PassengerCount`] of a single [`Booking`].
    pub const MAX: Self = Self(10);

    /// Creates a new [`PassengerCount`] if the given `count` is in range.
    #[must_use]
    pub fn new(count: impl TryInto<u16>) -> Option<Self> {
        let count = count.try_into().ok()?;
        (1..=Self::MAX.0).contains(&count).then_some(Self(count))
    }

    /// Returns the number of passengers.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the [`Quantity`] of seats required for these passengers.
    #[must_use]
    pub fn quantity(self) -> Quantity {
        Quantity::from(NonZeroU16::MIN.saturating_add(self.0 - 1))
    }
}

define_kind! {
    #[doc = "Status of a flight [`Booking`]."]
    enum Status {
        #[doc = "[`Booking`] awaits its payment."]
        Pending = 1,

        #[doc = "[`Booking`] is paid."]
        Confirmed = 2,

        #[doc = "[`Booking`] is cancelled."]
        Cancelled = 3,

        #[doc = "[`flight::Flight`] has taken place."]
        Completed = 4,
    }
}

#[cfg(test)]
mod spec {
    use super::PassengerCount;

    #[test]
    fn passenger_count() {
        for valid in 1..=10 {
            let count = PassengerCount::new(valid).unwrap();
            assert_eq!(count.quantity().get(), count.get());
        }
        for invalid in [0, 11, -1, 65_536] {
            assert!(
                PassengerCount::new(invalid).is_none(),
                "`{invalid}` is valid",
            );
        }
    }
}
