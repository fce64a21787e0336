//! [`HotelBooking`] definitions.

use std::future;

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;

use crate::{api, api::scalar, AsError, Context, Error};

use super::{BookingValue, Id, Reference};

/// Booking of `Hotel` rooms.
#[derive(Clone, Debug)]
pub struct HotelBooking {
    /// Underlying [`domain::booking::Hotel`].
    booking: domain::booking::Hotel,

    /// Booked [`api::Hotel`].
    hotel: OnceCell<api::Hotel>,
}

impl From<domain::booking::Hotel> for HotelBooking {
    fn from(booking: domain::booking::Hotel) -> Self {
        Self {
            booking,
            hotel: OnceCell::new(),
        }
    }
}

/// Booking of `Hotel` rooms.
#[graphql_object(context = Context, impl = BookingValue)]
impl HotelBooking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.id",
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
            gql.name = "HotelBooking.reference",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn reference(&self) -> Reference {
        self.booking.reference.clone().into()
    }

    /// Booked `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.hotel",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn hotel(&self, ctx: &Context) -> Result<&api::Hotel, Error> {
        self.hotel
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::hotel::ById::by(self.booking.hotel_id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|h| {
                        future::ready(h.map_or_else(
                            || Err(api::hotel::HotelError::NotExists.into()),
                            |h| Ok(h.into()),
                        ))
                    })
            })
            .await
    }

    /// `Date` of the arrival.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.checkIn",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_in(&self) -> Date {
        self.booking.check_in
    }

    /// `Date` of the departure.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.checkOut",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_out(&self) -> Date {
        self.booking.check_out
    }

    /// Number of booked nights.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.nights",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn nights(&self) -> i32 {
        i32::try_from(self.booking.nights()).unwrap_or(i32::MAX)
    }

    /// Number of booked rooms.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.roomsCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn rooms_count(&self) -> i32 {
        self.booking.rooms_count.get().into()
    }

    /// Number of guests to stay.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.guestsCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn guests_count(&self) -> i32 {
        self.booking.guests_count.get().into()
    }

    /// Special requests of the guests, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.specialRequests",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn special_requests(&self) -> Option<SpecialRequests> {
        self.booking.special_requests.clone().map(Into::into)
    }

    /// Total price of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HotelBooking.totalPrice",
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
            gql.name = "HotelBooking.status",
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
            gql.name = "HotelBooking.payments",
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
            gql.name = "HotelBooking.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.booking.created_at.coerce()
    }
}

/// Special requests to a `HotelBooking`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "HotelBookingSpecialRequests",
    with = scalar::Via::<domain::booking::hotel::SpecialRequests>,
)]
pub struct SpecialRequests(domain::booking::hotel::SpecialRequests);

/// Status of a `HotelBooking`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "HotelBookingStatus")]
pub enum Status {
    /// Awaits its payment.
    Pending,

    /// Is paid.
    Confirmed,

    /// Is cancelled.
    Cancelled,

    /// Guests have arrived.
    CheckedIn,

    /// Guests have left.
    CheckedOut,
}

impl From<domain::booking::hotel::Status> for Status {
    fn from(status: domain::booking::hotel::Status) -> Self {
        use domain::booking::hotel::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Confirmed => Self::Confirmed,
            S::Cancelled => Self::Cancelled,
            S::CheckedIn => Self::CheckedIn,
            S::CheckedOut => Self::CheckedOut,
        }
    }
}
