//! [`Flight`] definitions.

use std::sync::LazyLock;

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{airline, availability, booking, city};
#[cfg(doc)]
use crate::domain::{Airline, City};

/// Scheduled flight of an [`Airline`] between two [`City`]s.
#[derive(Clone, Debug)]
pub struct Flight {
    /// ID of this [`Flight`].
    pub id: Id,

    /// [`Number`] of this [`Flight`].
    ///
    /// Unique together with the [`Flight::date`].
    pub number: Number,

    /// ID of the [`Airline`] operating this [`Flight`].
    pub airline_id: airline::Id,

    /// ID of the [`City`] this [`Flight`] departs from.
    pub source_city_id: city::Id,

    /// ID of the [`City`] this [`Flight`] arrives to.
    pub destination_city_id: city::Id,

    /// Local time this [`Flight`] departs at.
    pub departure_time: time::Time,

    /// Local time this [`Flight`] arrives at.
    pub arrival_time: time::Time,

    /// [`Date`] of this [`Flight`].
    pub date: Date,

    /// Price of an [`TravelClass::Economy`] seat.
    pub economy_price: Money,

    /// Price of a [`TravelClass::Business`] seat, if this class is offered.
    pub business_price: Option<Money>,

    /// Seats [`Capacity`] of this [`Flight`].
    ///
    /// [`Capacity`]: availability::Capacity
    pub capacity: availability::Capacity,

    /// [`Status`] of this [`Flight`].
    pub status: Status,
}

impl Flight {
    /// Returns the price of a single seat in the provided [`TravelClass`].
    ///
    /// [`None`] is returned if this [`Flight`] doesn't offer the class.
    #[must_use]
    pub fn unit_price(&self, class: TravelClass) -> Option<Money> {
        match class {
            TravelClass::Economy => Some(self.economy_price),
            TravelClass::Business => self.business_price,
        }
    }

    /// Checks whether this [`Flight`] accepts new bookings at the provided
    /// `today` [`Date`].
    #[must_use]
    pub fn is_bookable(&self, today: Date) -> bool {
        matches!(self.status, Status::Scheduled | Status::Delayed)
            && self.date >= today
    }
}

/// ID of a [`Flight`].
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

/// Number of a [`Flight`] (like `AI202`).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`Number`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`Number`].
    fn check(num: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[A-Z0-9]{2,10}$").expect("valid regex")
        });

        REGEX.is_match(num.as_ref())
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Flight` number")
    }
}

define_kind! {
    #[doc = "Status of a [`Flight`]."]
    enum Status {
        #[doc = "[`Flight`] is planned according to its schedule."]
        Scheduled = 1,

        #[doc = "[`Flight`] departs later than scheduled."]
        Delayed = 2,

        #[doc = "[`Flight`] won't take place."]
        Cancelled = 3,

        #[doc = "Passengers are boarding the [`Flight`]."]
        Boarding = 4,

        #[doc = "[`Flight`] has departed."]
        Departed = 5,

        #[doc = "[`Flight`] has arrived."]
        Arrived = 6,
    }
}

define_kind! {
    #[doc = "Travel class of a [`Flight`] seat."]
    enum TravelClass {
        #[doc = "Economy class."]
        Economy = 1,

        #[doc = "Business class."]
        Business = 2,
    }
}

/// Order of [`Flight`] seats.
#[derive(Clone, Copy, Debug)]
pub struct Order {
    /// ID of the [`Flight`] to book.
    pub flight_id: Id,

    /// Number of passengers to book seats for.
    pub passenger_count: booking::flight::PassengerCount,

    /// [`TravelClass`] of the booked seats.
    pub travel_class: TravelClass,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, Money};
    use rust_decimal::Decimal;
    use time::macros::time;

    use crate::domain::{airline, availability::Capacity, city};

    use super::{Flight, Id, Number, Status, TravelClass};

    fn flight(status: Status, date: Date) -> Flight {
        Flight {
            id: Id::new(),
            number: Number::new("AI202").unwrap(),
            airline_id: airline::Id::new(),
            source_city_id: city::Id::new(),
            destination_city_id: city::Id::new(),
            departure_time: time!(10:30),
            arrival_time: time!(12:45),
            date,
            economy_price: Money {
                amount: Decimal::new(150, 0),
                currency: Currency::Usd,
            },
            business_price: None,
            capacity: Capacity::full(180),
            status,
        }
    }

    #[test]
    fn number() {
        for valid in ["AI202", "6E", "UK1234567X"] {
            assert!(Number::from_str(valid).is_ok(), "`{valid}` is invalid");
        }
        for invalid in ["", "A", "ai202", "AI 202", "AI202AI202A"] {
            assert!(Number::from_str(invalid).is_err(), "`{invalid}` is valid");
        }
    }

    #[test]
    fn unit_price() {
        let f = flight(Status::Scheduled, Date::today());

        assert_eq!(f.unit_price(TravelClass::Economy), Some(f.economy_price));
        assert_eq!(f.unit_price(TravelClass::Business), None);
    }

    #[test]
    fn is_bookable() {
        let today = Date::from_ymd(2024, 5, 10).unwrap();
        let yesterday = Date::from_ymd(2024, 5, 9).unwrap();

        assert!(flight(Status::Scheduled, today).is_bookable(today));
        assert!(flight(Status::Delayed, today).is_bookable(today));

        assert!(!flight(Status::Scheduled, yesterday).is_bookable(today));
        for status in [
            Status::Cancelled,
            Status::Boarding,
            Status::Departed,
            Status::Arrived,
        ] {
            assert!(!flight(status, today).is_bookable(today));
        }
    }
}
