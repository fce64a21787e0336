//! GraphQL [`Query`]s definitions.

use common::{Date, Money};
use juniper::graphql_object;
use service::{
    domain::{
        availability::{Quantity, Resource},
        booking::{flight::PassengerCount, hotel::RoomsCount},
        hotel::StarRating,
    },
    query, read, Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Searches bookable `Flight`s between two `City`s on the provided
    /// `Date`, having enough seats for the provided number of `passengers`.
    ///
    /// Found `Flight`s are ordered by their departure time.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PASSENGER_COUNT` - `passengers` is not between 1 and 10;
    /// - `SAME_CITIES` - `source` and `destination` are the same `City`;
    /// - `DATE_IN_PAST` - the provided `date` has passed already.
    #[tracing::instrument(
        skip_all,
        fields(
            date = %date,
            destination = %destination,
            gql.name = "searchFlights",
            otel.name = Self::SPAN_NAME,
            passengers = passengers,
            source = %source,
        ),
    )]
    pub async fn search_flights(
        source: api::city::Id,
        destination: api::city::Id,
        date: Date,
        passengers: i32,
        ctx: &Context,
    ) -> Result<Vec<api::Flight>, Error> {
        let passengers = PassengerCount::new(passengers)
            .ok_or_else(|| api::ValidationError::PassengerCount.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::flights::Search {
                source_city_id: source.into(),
                destination_city_id: destination.into(),
                date,
                passengers,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|flights| flights.into_iter().map(Into::into).collect())
    }

    /// Searches `Hotel`s in the provided `City` having enough rooms for the
    /// whole stay.
    ///
    /// Found `Hotel`s are ordered by their star rating descending and then by
    /// their price per night ascending.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ROOMS_COUNT` - `rooms` is not between 1 and 5;
    /// - `INVALID_STAR_RATING` - `minRating` is not between 1 and 5;
    /// - `CHECK_IN_IN_PAST` - the provided `checkIn` has passed already;
    /// - `INVALID_DATE_RANGE` - `checkOut` is not after `checkIn`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = %check_in,
            check_out = %check_out,
            city = %city,
            gql.name = "searchHotels",
            max_price = ?max_price.map(|p| p.to_string()),
            min_rating = ?min_rating,
            otel.name = Self::SPAN_NAME,
            rooms = rooms,
        ),
    )]
    pub async fn search_hotels(
        city: api::city::Id,
        check_in: Date,
        check_out: Date,
        rooms: i32,
        min_rating: Option<i32>,
        max_price: Option<Money>,
        ctx: &Context,
    ) -> Result<Vec<api::Hotel>, Error> {
        let rooms = RoomsCount::new(rooms)
            .ok_or_else(|| api::ValidationError::RoomsCount.into())
            .map_err(ctx.error())?;
        let min_rating = min_rating
            .map(|r| {
                StarRating::new(r)
                    .ok_or_else(|| api::ValidationError::StarRating.into())
            })
            .transpose()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::hotels::Search {
                city_id: city.into(),
                check_in,
                check_out,
                rooms,
                min_rating,
                max_price,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|hotels| hotels.into_iter().map(Into::into).collect())
    }

    /// Lists `Attraction`s, optionally filtered by their `City`, category and
    /// maximum entry fee.
    ///
    /// Free `Attraction`s always pass the `maxFee` filter.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            city = ?city.map(|c| c.to_string()),
            gql.name = "attractions",
            max_fee = ?max_fee.map(|f| f.to_string()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn attractions(
        city: Option<api::city::Id>,
        category: Option<api::attraction::Category>,
        max_fee: Option<Money>,
        ctx: &Context,
    ) -> Result<Vec<api::Attraction>, Error> {
        ctx.service()
            .execute(query::attractions::List::by(read::attraction::Filter {
                city_id: city.map(Into::into),
                category: category.map(Into::into),
                max_fee,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|a| a.into_iter().map(Into::into).collect())
    }

    /// Returns the `Flight` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `FLIGHT_NOT_EXISTS` - the `Flight` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "flight",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn flight(
        id: api::flight::Id,
        ctx: &Context,
    ) -> Result<api::Flight, Error> {
        ctx.service()
            .execute(query::flight::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::flight::FlightError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Hotel` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `HOTEL_NOT_EXISTS` - the `Hotel` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "hotel",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn hotel(
        id: api::hotel::Id,
        ctx: &Context,
    ) -> Result<api::Hotel, Error> {
        ctx.service()
            .execute(query::hotel::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::hotel::HotelError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Checks whether the provided `quantity` of seats of a `Flight` or rooms
    /// of a `Hotel` is available.
    ///
    /// Exactly one of `flightId` or `hotelId` must be provided. The result
    /// may become stale right after being read.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_RESOURCE` - not exactly one of `flightId` or `hotelId` is
    ///                          provided;
    /// - `INVALID_QUANTITY` - `quantity` is not a positive number;
    /// - `RESOURCE_NOT_EXISTS` - the specified `Flight` or `Hotel` does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            flight_id = ?flight_id.map(|id| id.to_string()),
            gql.name = "availability",
            hotel_id = ?hotel_id.map(|id| id.to_string()),
            otel.name = Self::SPAN_NAME,
            quantity = quantity,
        ),
    )]
    pub async fn availability(
        flight_id: Option<api::flight::Id>,
        hotel_id: Option<api::hotel::Id>,
        quantity: i32,
        ctx: &Context,
    ) -> Result<api::availability::Snapshot, Error> {
        let resource = match (flight_id, hotel_id) {
            (Some(id), None) => Resource::Flight(id.into()),
            (None, Some(id)) => Resource::Hotel(id.into()),
            (None, None) | (Some(_), Some(_)) => {
                return Err(AvailabilityError::AmbiguousResource.into())
                    .map_err(ctx.error());
            }
        };
        let quantity = u16::try_from(quantity)
            .ok()
            .and_then(Quantity::new)
            .ok_or_else(|| api::ValidationError::Quantity.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::availability::Check { resource, quantity })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(api::availability::Snapshot)
            .ok_or_else(|| AvailabilityError::ResourceNotExists.into())
            .map_err(ctx.error())
    }

    /// Returns the `Booking` of the current `User` with the specified
    /// reference.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing;
    /// - `BOOKING_NOT_EXISTS` - the current `User` has no `Booking` with the
    ///                          specified reference.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "booking",
            otel.name = Self::SPAN_NAME,
            reference = %reference,
        ),
    )]
    pub async fn booking(
        reference: api::booking::Reference,
        ctx: &Context,
    ) -> Result<api::booking::BookingValue, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::booking::ByReference::by(reference.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .filter(|b| api::user::Id::from(b.user_id()) == my_id)
            .ok_or_else(|| api::booking::BookingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists all the `Booking`s of the current `User`, newest first.
    ///
    /// Parts of a `PackageBooking` are listed inside it only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myBookings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_bookings(
        ctx: &Context,
    ) -> Result<Vec<api::booking::BookingValue>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::bookings::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|b| b.into_iter().map(Into::into).collect())
    }
}

impl AsError for query::flights::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SAME_CITIES"]
                #[status = BAD_REQUEST]
                #[message = "Source and destination `City`s must differ"]
                SameCities,

                #[code = "DATE_IN_PAST"]
                #[status = BAD_REQUEST]
                #[message = "Departure `Date` must not be in the past"]
                DateInPast,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DateInPast(_) => Some(Error::DateInPast.into()),
            Self::SameCities(_) => Some(Error::SameCities.into()),
        }
    }
}

impl AsError for query::hotels::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CheckInInPast(_) => Some(StayError::CheckInInPast.into()),
            Self::InvalidDateRange { .. } => {
                Some(StayError::InvalidDateRange.into())
            }
        }
    }
}

define_error! {
    enum StayError {
        #[code = "CHECK_IN_IN_PAST"]
        #[status = BAD_REQUEST]
        #[message = "Check-in `Date` must not be in the past"]
        CheckInInPast,

        #[code = "INVALID_DATE_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "Check-out `Date` must be after the check-in `Date`"]
        InvalidDateRange,
    }
}

define_error! {
    enum AvailabilityError {
        #[code = "AMBIGUOUS_RESOURCE"]
        #[status = BAD_REQUEST]
        #[message = "Exactly one of `flightId` or `hotelId` must be provided"]
        AmbiguousResource,

        #[code = "RESOURCE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Specified `Flight` or `Hotel` does not exist"]
        ResourceNotExists,
    }
}
