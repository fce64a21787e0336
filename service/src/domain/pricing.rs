//! Price computations of bookings.

use common::{Date, Money, Percent};
use derive_more::Display;

use crate::domain::{
    booking::{flight::PassengerCount, hotel::RoomsCount, package::Discount},
    flight::TravelClass,
    Flight, Hotel,
};

/// Computes the total price of [`Flight`] seats in the provided
/// [`TravelClass`] for the provided [`PassengerCount`].
///
/// # Errors
///
/// With [`Error::UnavailableClass`] if the [`Flight`] doesn't offer the
/// requested [`TravelClass`].
pub fn flight_price(
    flight: &Flight,
    class: TravelClass,
    passengers: PassengerCount,
) -> Result<Money, Error> {
    flight
        .unit_price(class)
        .map(|price| price.times(passengers.get()))
        .ok_or(Error::UnavailableClass(class))
}

/// Computes the total price of [`Hotel`] rooms for the nights between the
/// provided `check_in` and `check_out` [`Date`]s.
///
/// # Errors
///
/// With [`Error::InvalidDateRange`] if `check_out` is not after `check_in`.
pub fn hotel_price(
    hotel: &Hotel,
    check_in: Date,
    check_out: Date,
    rooms: RoomsCount,
) -> Result<Money, Error> {
    let nights = check_in.days_until(check_out);
    if nights <= 0 {
        return Err(Error::InvalidDateRange);
    }
    Ok(hotel.price_per_night.times(nights).times(rooms.get()))
}

/// Computes the total price of a package consisting of a flight and a hotel
/// bookings, applying the provided [`Discount`].
///
/// # Errors
///
/// With [`Error::CurrencyMismatch`] if the totals are in different
/// currencies.
pub fn package_price(
    flight_total: Money,
    hotel_total: Money,
    discount: Discount,
) -> Result<Money, Error> {
    flight_total
        .checked_add(hotel_total)
        .map(|sum| sum.discounted(Percent::from(discount)))
        .ok_or(Error::CurrencyMismatch)
}

/// Error of computing a price.
#[derive(Clone, Copy, Debug, Display, Eq, derive_more::Error, PartialEq)]
pub enum Error {
    /// Requested [`TravelClass`] is not offered.
    #[display("`{_0}` class is not offered")]
    UnavailableClass(#[error(not(source))] TravelClass),

    /// Check-out is not after check-in.
    #[display("check-out must be after check-in")]
    InvalidDateRange,

    /// Prices are in different currencies.
    #[display("prices are in different currencies")]
    CurrencyMismatch,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, Money, Percent};
    use rust_decimal::Decimal;
    use time::macros::time;

    use crate::domain::{
        availability::Capacity,
        booking::{
            flight::PassengerCount, hotel::RoomsCount, package::Discount,
        },
        airline, city, flight, hotel, Flight, Hotel,
    };

    use super::{flight_price, hotel_price, package_price, Error};

    fn usd(amount: i64) -> Money {
        Money {
            amount: Decimal::new(amount, 0),
            currency: Currency::Usd,
        }
    }

    fn scheduled_flight() -> Flight {
        Flight {
            id: flight::Id::new(),
            number: flight::Number::new("AI202").unwrap(),
            airline_id: airline::Id::new(),
            source_city_id: city::Id::new(),
            destination_city_id: city::Id::new(),
            departure_time: time!(06:00),
            arrival_time: time!(08:10),
            date: Date::from_ymd(2024, 1, 1).unwrap(),
            economy_price: usd(150),
            business_price: Some(usd(400)),
            capacity: Capacity::full(100),
            status: flight::Status::Scheduled,
        }
    }

    fn seaside_hotel() -> Hotel {
        Hotel {
            id: hotel::Id::new(),
            name: hotel::Name::new("Sea View").unwrap(),
            city_id: city::Id::new(),
            address: hotel::Address::new("1 Beach Road").unwrap(),
            price_per_night: usd(80),
            star_rating: hotel::StarRating::new(4).unwrap(),
            capacity: Capacity::full(20),
        }
    }

    #[test]
    fn prices_flight() {
        let two = PassengerCount::new(2).unwrap();

        assert_eq!(
            flight_price(
                &scheduled_flight(),
                flight::TravelClass::Economy,
                two,
            ),
            Ok(usd(300)),
        );
        assert_eq!(
            flight_price(
                &scheduled_flight(),
                flight::TravelClass::Business,
                two,
            ),
            Ok(usd(800)),
        );

        let mut economy_only = scheduled_flight();
        economy_only.business_price = None;
        assert_eq!(
            flight_price(&economy_only, flight::TravelClass::Business, two),
            Err(Error::UnavailableClass(flight::TravelClass::Business)),
        );
    }

    #[test]
    fn prices_hotel() {
        let check_in = Date::from_ymd(2024, 1, 1).unwrap();
        let check_out = Date::from_ymd(2024, 1, 4).unwrap();
        let two = RoomsCount::new(2).unwrap();

        assert_eq!(
            hotel_price(&seaside_hotel(), check_in, check_out, two),
            Ok(usd(480)),
        );
        assert_eq!(
            hotel_price(&seaside_hotel(), check_in, check_in, two),
            Err(Error::InvalidDateRange),
        );
        assert_eq!(
            hotel_price(&seaside_hotel(), check_out, check_in, two),
            Err(Error::InvalidDateRange),
        );
    }

    #[test]
    fn prices_package() {
        let ten = Discount::new(Percent::from_str("10").unwrap()).unwrap();

        assert_eq!(package_price(usd(300), usd(480), ten), Ok(usd(702)));
        assert_eq!(
            package_price(
                usd(300),
                Money {
                    amount: Decimal::new(480, 0),
                    currency: Currency::Eur,
                },
                ten,
            ),
            Err(Error::CurrencyMismatch),
        );
    }
}
