//! GraphQL API definitions.

pub mod airline;
pub mod attraction;
pub mod availability;
pub mod booking;
pub mod city;
pub mod flight;
pub mod hotel;
mod mutation;
pub mod payment;
mod query;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    airline::Airline,
    attraction::Attraction,
    booking::Booking,
    city::City,
    flight::Flight,
    hotel::Hotel,
    mutation::Mutation,
    payment::Payment,
    query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum ValidationError {
        #[code = "INVALID_PASSENGER_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Passenger count must be between 1 and 10"]
        PassengerCount,

        #[code = "INVALID_ROOMS_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Rooms count must be between 1 and 5"]
        RoomsCount,

        #[code = "INVALID_GUESTS_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Guests count must be between 1 and 10"]
        GuestsCount,

        #[code = "INVALID_STAR_RATING"]
        #[status = BAD_REQUEST]
        #[message = "Star rating must be between 1 and 5"]
        StarRating,

        #[code = "INVALID_QUANTITY"]
        #[status = BAD_REQUEST]
        #[message = "Quantity must be a positive number"]
        Quantity,

        #[code = "INVALID_DISCOUNT"]
        #[status = BAD_REQUEST]
        #[message = "Discount must be between 0% and 50%"]
        Discount,
    }
}
