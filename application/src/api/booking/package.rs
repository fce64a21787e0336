//! [`PackageBooking`] definitions.

use common::{DateTime, Money, Percent};
use juniper::{graphql_object, GraphQLEnum};
use service::domain;

use crate::{api, Context, Error};

use super::{BookingValue, FlightBooking, HotelBooking, Id, Reference};

/// Booking of `Flight` seats and `Hotel` rooms together, at a discount.
#[derive(Clone, Debug)]
pub struct PackageBooking {
    /// Underlying [`domain::booking::Package`].
    booking: domain::booking::Package,

    /// [`FlightBooking`] of this package.
    flight: FlightBooking,

    /// [`HotelBooking`] of this package.
    hotel: HotelBooking,
}

impl From<domain::booking::Package> for PackageBooking {
    fn from(booking: domain::booking::Package) -> Self {
        Self {
            flight: booking.flight.clone().into(),
            hotel: booking.hotel.clone().into(),
            booking,
        }
    }
}

/// Booking of `Flight` seats and `Hotel` rooms together, at a discount.
#[graphql_object(context = Context, impl = BookingValue)]
impl PackageBooking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.id",
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
            gql.name = "PackageBooking.reference",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn reference(&self) -> Reference {
        self.booking.reference.clone().into()
    }

    /// `FlightBooking` of this package.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.flight",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn flight(&self) -> &FlightBooking {
        &self.flight
    }

    /// `HotelBooking` of this package.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.hotel",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn hotel(&self) -> &HotelBooking {
        &self.hotel
    }

    /// Discount applied to the sum of the `FlightBooking` and the
    /// `HotelBooking` prices.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.discount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn discount(&self) -> Percent {
        self.booking.discount.into()
    }

    /// Total price of this `Booking`, after the discount.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.totalPrice",
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
            gql.name = "PackageBooking.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.booking.status.into()
    }

    /// `Payment`s of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PackageBooking.payments",
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
            gql.name = "PackageBooking.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.booking.created_at.coerce()
    }
}

/// Status of a `PackageBooking`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PackageBookingStatus")]
pub enum Status {
    /// Awaits its payment.
    Pending,

    /// Is paid.
    Confirmed,

    /// Is cancelled.
    Cancelled,

    /// Both the flight and the stay are over.
    Completed,
}

impl From<domain::booking::package::Status> for Status {
    fn from(status: domain::booking::package::Status) -> Self {
        use domain::booking::package::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Confirmed => Self::Confirmed,
            S::Cancelled => Self::Cancelled,
            S::Completed => Self::Completed,
        }
    }
}
