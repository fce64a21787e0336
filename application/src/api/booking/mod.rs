//! [`Booking`]-related definitions.

mod flight;
mod hotel;
mod package;

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLInterface, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

pub use self::{
    flight::FlightBooking,
    hotel::{HotelBooking, SpecialRequests},
    package::PackageBooking,
};

/// Booking of a `Flight`, a `Hotel`, or both of them as a package.
#[derive(Clone, Debug, GraphQLInterface)]
#[graphql(
    context = Context,
    for = [FlightBooking, HotelBooking, PackageBooking],
)]
pub struct Booking {
    /// Unique identifier of the `Booking`.
    id: Id,

    /// Human-readable reference of the `Booking`.
    reference: Reference,

    /// Total price of the `Booking`.
    total_price: Money,

    /// `DateTime` when the `Booking` was created.
    created_at: DateTime,
}

impl From<domain::Booking> for BookingValue {
    fn from(booking: domain::Booking) -> Self {
        use domain::Booking;
        match booking {
            Booking::Flight(b) => Self::FlightBooking(b.into()),
            Booking::Hotel(b) => Self::HotelBooking(b.into()),
            Booking::Package(b) => Self::PackageBooking(b.into()),
        }
    }
}

/// Fetches the `Payment`s of the `Booking` with the provided ID.
///
/// # Errors
///
/// Errors if the `Payment`s cannot be fetched.
async fn payments(
    id: domain::booking::Id,
    ctx: &Context,
) -> Result<Vec<api::Payment>, Error> {
    ctx.service()
        .execute(query::payments::ByBooking::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(|p| p.into_iter().map(Into::into).collect())
}

/// Unique identifier of a `Booking`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

/// Human-readable reference of a `Booking`, like `7F3A9C01BE`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BookingReference",
    with = scalar::Via::<domain::booking::Reference>,
)]
pub struct Reference(domain::booking::Reference);

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` does not exist"]
        NotExists,
    }
}
