//! [`Hotel`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, define_error, Context};

/// A hotel.
#[derive(Clone, Debug, From)]
pub struct Hotel(domain::Hotel);

/// A hotel.
#[graphql_object(context = Context)]
impl Hotel {
    /// Unique identifier of this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// `City` this `Hotel` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn city(&self) -> api::City {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::City::new_unchecked(self.0.city_id)
        }
    }

    /// Street address of this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn address(&self) -> Address {
        self.0.address.clone().into()
    }

    /// Price of a single room per night in this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.pricePerNight",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price_per_night(&self) -> Money {
        self.0.price_per_night
    }

    /// Number of stars of this `Hotel`, from 1 to 5.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.starRating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn star_rating(&self) -> i32 {
        u8::from(self.0.star_rating).into()
    }

    /// Total number of rooms in this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.totalRooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_rooms(&self) -> i32 {
        i32::try_from(self.0.capacity.total()).unwrap_or(i32::MAX)
    }

    /// Number of rooms still available in this `Hotel`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Hotel.availableRooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn available_rooms(&self) -> i32 {
        i32::try_from(self.0.capacity.available()).unwrap_or(i32::MAX)
    }
}

/// Unique identifier of a `Hotel`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::hotel::Id)]
#[into(domain::hotel::Id)]
#[graphql(name = "HotelId", transparent)]
pub struct Id(Uuid);

/// Name of a `Hotel`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "HotelName", with = scalar::Via::<domain::hotel::Name>)]
pub struct Name(domain::hotel::Name);

/// Street address of a `Hotel`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "HotelAddress", with = scalar::Via::<domain::hotel::Address>)]
pub struct Address(domain::hotel::Address);

define_error! {
    enum HotelError {
        #[code = "HOTEL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Hotel` with the specified ID does not exist"]
        NotExists,
    }
}
