//! Domain definitions.

pub mod airline;
pub mod attraction;
pub mod availability;
pub mod booking;
pub mod city;
pub mod flight;
pub mod hotel;
pub mod payment;
pub mod pricing;
pub mod user;

pub use self::{
    airline::Airline, attraction::Attraction, booking::Booking, city::City,
    flight::Flight, hotel::Hotel, payment::Payment, user::User,
};
