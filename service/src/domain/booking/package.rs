//! [`Package`] booking definitions.

use common::{define_kind, Money, Percent};
use derive_more::{Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::{Booking, User};

use super::{
    flight, hotel, CancelError, CreationDateTime, Flight, Hotel, Id,
    NotPending, Reference,
};

/// [`Booking`] of a [`Flight`] and a [`Hotel`] together with a [`Discount`].
///
/// Both sub-[`Booking`]s belong to this [`Package`] exclusively and always
/// mirror its [`Status`].
#[derive(Clone, Debug)]
pub struct Package {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`Reference`] of this [`Booking`].
    pub reference: Reference,

    /// ID of the [`User`] owning this [`Booking`].
    pub user_id: user::Id,

    /// [`Flight`] sub-[`Booking`] of this [`Package`].
    pub flight: Flight,

    /// [`Hotel`] sub-[`Booking`] of this [`Package`].
    pub hotel: Hotel,

    /// [`Discount`] applied to this [`Package`].
    pub discount: Discount,

    /// Total price of this [`Booking`] with the [`Discount`] applied.
    pub total_price: Money,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`DateTime`] when this [`Booking`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

impl Package {
    /// Confirms this [`Booking`] along with its sub-[`Booking`]s.
    ///
    /// # Errors
    ///
    /// With [`NotPending`] if this [`Booking`] is not [`Status::Pending`].
    pub fn confirm(&mut self) -> Result<(), NotPending> {
        if self.status != Status::Pending {
            return Err(NotPending);
        }
        self.status = Status::Confirmed;
        self.mirror();
        Ok(())
    }

    /// Cancels this [`Booking`] along with its sub-[`Booking`]s.
    ///
    /// # Errors
    ///
    /// If this [`Booking`] is cancelled or completed already.
    pub fn cancel(&mut self) -> Result<(), CancelError> {
        match self.status {
            Status::Pending | Status::Confirmed => {
                self.status = Status::Cancelled;
                self.mirror();
                Ok(())
            }
            Status::Cancelled => Err(CancelError::AlreadyCancelled),
            Status::Completed => Err(CancelError::NotCancellable),
        }
    }

    /// Propagates the [`Status`] of this [`Package`] to its sub-[`Booking`]s.
    fn mirror(&mut self) {
        let (flight, hotel) = match self.status {
            Status::Pending => {
                (flight::Status::Pending, hotel::Status::Pending)
            }
            Status::Confirmed => {
                (flight::Status::Confirmed, hotel::Status::Confirmed)
            }
            Status::Cancelled => {
                (flight::Status::Cancelled, hotel::Status::Cancelled)
            }
            Status::Completed => {
                (flight::Status::Completed, hotel::Status::CheckedOut)
            }
        };
        self.flight.status = flight;
        self.hotel.status = hotel;
    }
}

/// Discount of a [`Package`], from 0% to 50%.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Discount(Percent);

impl Discount {
    /// Absence of a [`Discount`].
    pub const NONE: Self = Self(Percent::ZERO);

    /// Creates a new [`Discount`] if the given [`Percent`] doesn't exceed 50%.
    #[must_use]
    pub fn new(percent: Percent) -> Option<Self> {
        (percent.value() <= Decimal::from(50)).then_some(Self(percent))
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::NONE
    }
}

define_kind! {
    #[doc = "Status of a [`Package`] [`Booking`]."]
    enum Status {
        #[doc = "[`Booking`] awaits its payment."]
        Pending = 1,

        #[doc = "[`Booking`] is paid."]
        Confirmed = 2,

        #[doc = "[`Booking`] is cancelled."]
        Cancelled = 3,

        #[doc = "Travel has taken place."]
        Completed = 4,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, DateTime, Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::{
        booking::{
            flight::PassengerCount,
            hotel::{GuestsCount, RoomsCount},
            CancelError, Id, NotPending, Reference,
        },
        flight::{self, TravelClass},
        hotel, user,
    };

    use super::{Discount, Flight, Hotel, Package, Status};

    fn usd(amount: i64) -> Money {
        Money {
            amount: Decimal::new(amount, 0),
            currency: Currency::Usd,
        }
    }

    fn package() -> Package {
        let id = Id::new();
        let user_id = user::Id::new();
        let created_at = DateTime::now().coerce();
        Package {
            id,
            reference: Reference::generate(),
            user_id,
            flight: Flight {
                id: Id::new(),
                reference: Reference::generate(),
                user_id,
                flight_id: flight::Id::new(),
                passenger_count: PassengerCount::new(2).unwrap(),
                travel_class: TravelClass::Economy,
                total_price: usd(300),
                status: super::flight::Status::Pending,
                package_id: Some(id),
                created_at,
            },
            hotel: Hotel {
                id: Id::new(),
                reference: Reference::generate(),
                user_id,
                hotel_id: hotel::Id::new(),
                check_in: Date::from_ymd(2024, 1, 1).unwrap(),
                check_out: Date::from_ymd(2024, 1, 4).unwrap(),
                rooms_count: RoomsCount::new(2).unwrap(),
                guests_count: GuestsCount::new(4).unwrap(),
                special_requests: None,
                total_price: usd(480),
                status: super::hotel::Status::Pending,
                package_id: Some(id),
                created_at,
            },
            discount: Discount::new(Percent::from_str("10").unwrap()).unwrap(),
            total_price: usd(702),
            status: Status::Pending,
            created_at,
        }
    }

    #[test]
    fn discount() {
        assert!(Discount::new(Percent::from_str("0").unwrap()).is_some());
        assert!(Discount::new(Percent::from_str("50").unwrap()).is_some());

        assert!(Discount::new(Percent::from_str("50.01").unwrap()).is_none());
        assert!(Discount::new(Percent::from_str("100").unwrap()).is_none());
    }

    #[test]
    fn confirms_with_sub_bookings() {
        let mut p = package();

        assert_eq!(p.confirm(), Ok(()));
        assert_eq!(p.status, Status::Confirmed);
        assert_eq!(p.flight.status, super::flight::Status::Confirmed);
        assert_eq!(p.hotel.status, super::hotel::Status::Confirmed);

        assert_eq!(p.confirm(), Err(NotPending));
    }

    #[test]
    fn cancels_with_sub_bookings() {
        let mut p = package();

        assert_eq!(p.cancel(), Ok(()));
        assert_eq!(p.flight.status, super::flight::Status::Cancelled);
        assert_eq!(p.hotel.status, super::hotel::Status::Cancelled);

        assert_eq!(p.cancel(), Err(CancelError::AlreadyCancelled));
    }

    #[test]
    fn refuses_cancelling_completed() {
        let mut p = package();
        p.status = Status::Completed;

        assert_eq!(p.cancel(), Err(CancelError::NotCancellable));
    }
}
