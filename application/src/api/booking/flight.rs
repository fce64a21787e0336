//! [`FlightBooking`] definitions.

use std::future;

use common::{DateTime, Money};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;

use crate::{api, AsError, Context, Error};

use super::{BookingValue, Id, Reference};

/// Booking of `Flight` seats.
#[derive(Clone, Debug)]
pub struct FlightBooking {
    /// Underlying [`domain::booking::Flight`].
    booking: domain::booking::Flight,

    /// Booked [`api::Flight`].
    flight: OnceCell<api::Flight>,
}

impl From<domain::booking::Flight> for FlightBooking {
    fn from(booking: domain::booking::Flight) -> Self {
        Self {
            booking,
            flight: OnceCell::new(),
        }
    }
}

/// Booking of `Flight` seats.
#[graphql_object(context = Context, impl = BookingValue)]
impl FlightBooking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.booking.id.into()
    }

    /// Human-readable reference of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.reference",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn reference(&self) -> Reference {
        self.booking.reference.clone().into()
    }

    /// Booked `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.flight",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn flight(&self, ctx: &Context) -> Result<&api::Flight, Error> {
        self.flight
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::flight::ById::by(self.booking.flight_id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|f| {
                        future::ready(f.map_or_else(
                            || Err(api::flight::FlightError::NotExists.into()),
                            |f| Ok(f.into()),
                        ))
                    })
            })
            .await
    }

    /// Number of booked seats.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.passengerCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn passenger_count(&self) -> i32 {
        self.booking.passenger_count.get().into()
    }

    /// `TravelClass` of the booked seats.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.travelClass",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn travel_class(&self) -> api::flight::TravelClass {
        self.booking.travel_class.into()
    }

    /// Total price of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.totalPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_price(&self) -> Money {
        self.booking.total_price
    }

    /// Status of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.booking.status.into()
    }

    /// `Payment`s of this `Booking`.
    ///
    /// Always empty for a `Booking` being a part of a `PackageBooking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.payments",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn payments(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Payment>, Error> {
        super::payments(self.booking.id, ctx).await
    }

    /// `DateTime` when this `Booking` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FlightBooking.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.booking.created_at.coerce()
    }
}

/// Status of a `FlightBooking`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "FlightBookingStatus")]
pub enum Status {
    /// Awaits its payment.
    Pending,

    /// Is paid.
    Confirmed,

    /// Is cancelled.
    Cancelled,

    /// `Flight` has departed.
    Completed,
}

impl From<domain::booking::flight::Status> for Status {
    fn from(status: domain::booking::flight::Status) -> Self {
        use domain::booking::flight::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Confirmed => Self::Confirmed,
            S::Cancelled => Self::Cancelled,
            S::Completed => Self::Completed,
        }
    }
}
