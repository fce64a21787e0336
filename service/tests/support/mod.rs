//! Fixtures shared by the integration tests.

#![allow(dead_code, reason = "not every test binary uses every fixture")]

use std::{num::NonZeroU8, str::FromStr as _, time::Duration};

use common::{
    operations::{By, Insert, Select},
    Date, Money,
};
use service::{
    domain::{
        airline,
        availability::{Capacity, Resource},
        booking, city, flight, hotel, user, Airline, City, Flight, Hotel,
    },
    infra::{Database as _, Memory},
    task, Config, Service,
};
use time::macros::time;

/// [`Service`] over a seeded [`Memory`] database.
pub struct World {
    pub service: Service<Memory>,
    pub flight: Flight,
    pub hotel: Hotel,
    pub user_id: user::Id,
}

impl World {
    /// Returns a single room [`hotel::Order`] of the seeded [`Hotel`].
    pub fn hotel_order(&self, check_in: Date, check_out: Date) -> hotel::Order {
        hotel::Order {
            hotel_id: self.hotel.id,
            check_in,
            check_out,
            rooms_count: booking::hotel::RoomsCount::new(1).unwrap(),
            guests_count: booking::hotel::GuestsCount::new(1).unwrap(),
            special_requests: None,
        }
    }
}

pub fn usd(amount: &str) -> Money {
    Money::from_str(&format!("{amount}USD")).unwrap()
}

pub fn in_days(days: i64) -> Date {
    Date::today().plus_days(days).unwrap()
}

/// Seeds a [`Memory`] database with a [`Flight`] of the provided `seats`
/// and a [`Hotel`] of the provided `rooms` in its destination.
pub async fn world(seats: u32, rooms: u32) -> World {
    let db = Memory::new();

    let moscow = City {
        id: city::Id::new(),
        name: city::Name::new("Moscow").unwrap(),
        country: city::Country::new("Russia").unwrap(),
        airport_code: city::AirportCode::new("SVO"),
    };
    let paris = City {
        id: city::Id::new(),
        name: city::Name::new("Paris").unwrap(),
        country: city::Country::new("France").unwrap(),
        airport_code: city::AirportCode::new("CDG"),
    };
    let airline = Airline {
        id: airline::Id::new(),
        name: airline::Name::new("Aeroflot").unwrap(),
        code: airline::Code::new("SU").unwrap(),
    };
    let flight = Flight {
        id: flight::Id::new(),
        number: flight::Number::new("SU2454").unwrap(),
        airline_id: airline.id,
        source_city_id: moscow.id,
        destination_city_id: paris.id,
        departure_time: time!(09:30),
        arrival_time: time!(12:45),
        date: in_days(30),
        economy_price: usd("150"),
        business_price: Some(usd("400")),
        capacity: Capacity::full(seats),
        status: flight::Status::Scheduled,
    };
    let hotel = Hotel {
        id: hotel::Id::new(),
        name: hotel::Name::new("Le Marais").unwrap(),
        city_id: paris.id,
        address: hotel::Address::new("12 Rue des Archives").unwrap(),
        price_per_night: usd("80"),
        star_rating: hotel::StarRating::new(4).unwrap(),
        capacity: Capacity::full(rooms),
    };

    db.execute(Insert(moscow)).await.unwrap();
    db.execute(Insert(paris)).await.unwrap();
    db.execute(Insert(airline)).await.unwrap();
    db.execute(Insert(flight.clone())).await.unwrap();
    db.execute(Insert(hotel.clone())).await.unwrap();

    let config = Config {
        max_reference_attempts: NonZeroU8::new(5).unwrap(),
        complete_past_bookings: task::complete_past_bookings::Config {
            interval: Duration::from_secs(3600),
        },
    };
    let (service, _) = Service::new(config, db);

    World {
        service,
        flight,
        hotel,
        user_id: user::Id::new(),
    }
}

/// Returns the [`Capacity`] of the provided [`Resource`].
pub async fn capacity(svc: &Service<Memory>, resource: Resource) -> Capacity {
    svc.database()
        .execute(Select(By::<Option<Capacity>, _>::new(resource)))
        .await
        .unwrap()
        .unwrap()
}
