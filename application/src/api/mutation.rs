//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money, Percent};
use juniper::{graphql_object, GraphQLInputObject};
use service::{
    command,
    domain::{
        self,
        booking::{
            flight::PassengerCount,
            hotel::{GuestsCount, RoomsCount},
            package::Discount,
        },
    },
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Books seats of a `Flight` for the current `User`.
    ///
    /// The created `FlightBooking` awaits its payment.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing;
    /// - `INVALID_PASSENGER_COUNT` - `passengers` is not between 1 and 10;
    /// - `FLIGHT_NOT_EXISTS` - the specified `Flight` does not exist;
    /// - `FLIGHT_NOT_BOOKABLE` - the `Flight` has departed or is cancelled;
    /// - `TRAVEL_CLASS_UNAVAILABLE` - the `Flight` has no seats of the
    ///                                requested `TravelClass`;
    /// - `CAPACITY_EXCEEDED` - the `Flight` has not enough seats left;
    /// - `REFERENCE_COLLISION` - no unique reference was generated, so the
    ///                           request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            flight_id = %order.flight_id,
            gql.name = "createFlightBooking",
            otel.name = Self::SPAN_NAME,
            passengers = order.passengers,
            travel_class = ?order.travel_class,
        ),
    )]
    pub async fn create_flight_booking(
        order: FlightOrder,
        ctx: &Context,
    ) -> Result<api::booking::FlightBooking, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let order = order.try_into().map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateFlightBooking {
                user_id: my_id.into(),
                order,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books rooms of a `Hotel` for the current `User`.
    ///
    /// The created `HotelBooking` awaits its payment.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing;
    /// - `INVALID_ROOMS_COUNT` - `rooms` is not between 1 and 5;
    /// - `INVALID_GUESTS_COUNT` - `guests` is not between 1 and 10;
    /// - `CHECK_IN_IN_PAST` - the provided `checkIn` has passed already;
    /// - `INVALID_DATE_RANGE` - `checkOut` is not after `checkIn`;
    /// - `HOTEL_NOT_EXISTS` - the specified `Hotel` does not exist;
    /// - `CAPACITY_EXCEEDED` - the `Hotel` has not enough rooms left;
    /// - `REFERENCE_COLLISION` - no unique reference was generated, so the
    ///                           request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = %order.check_in,
            check_out = %order.check_out,
            gql.name = "createHotelBooking",
            hotel_id = %order.hotel_id,
            otel.name = Self::SPAN_NAME,
            rooms = order.rooms,
        ),
    )]
    pub async fn create_hotel_booking(
        order: HotelOrder,
        ctx: &Context,
    ) -> Result<api::booking::HotelBooking, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let order = order.try_into().map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateHotelBooking {
                user_id: my_id.into(),
                order,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books seats of a `Flight` and rooms of a `Hotel` together for the
    /// current `User`, applying the provided `discount` to the sum of their
    /// prices.
    ///
    /// Either both parts are booked, or none of them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - all the error codes of `createFlightBooking` and
    ///   `createHotelBooking`;
    /// - `INVALID_DISCOUNT` - `discount` exceeds 50%;
    /// - `CURRENCY_MISMATCH` - `Flight` and `Hotel` prices are in different
    ///                         currencies.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = %hotel.check_in,
            check_out = %hotel.check_out,
            discount = ?discount,
            flight_id = %flight.flight_id,
            gql.name = "createPackageBooking",
            hotel_id = %hotel.hotel_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_package_booking(
        flight: FlightOrder,
        hotel: HotelOrder,
        discount: Option<Percent>,
        ctx: &Context,
    ) -> Result<api::booking::PackageBooking, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let flight = flight.try_into().map_err(ctx.error())?;
        let hotel = hotel.try_into().map_err(ctx.error())?;
        let discount = discount
            .map(|d| {
                Discount::new(d)
                    .ok_or_else(|| api::ValidationError::Discount.into())
            })
            .transpose()
            .map_err(ctx.error())?
            .unwrap_or_default();

        ctx.service()
            .execute(command::CreatePackageBooking {
                user_id: my_id.into(),
                flight,
                hotel,
                discount,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels the `Booking` of the current `User`, releasing its seats and
    /// rooms.
    ///
    /// Cancelling a `PackageBooking` cancels both of its parts.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing;
    /// - `BOOKING_NOT_EXISTS` - the current `User` has no `Booking` with the
    ///                          specified ID;
    /// - `BOOKING_IN_PACKAGE` - the `Booking` is a part of a
    ///                          `PackageBooking`;
    /// - `ALREADY_CANCELLED` - the `Booking` is cancelled already;
    /// - `NOT_CANCELLABLE` - the `Booking` is completed or checked in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cancelBooking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cancel_booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::booking::BookingValue, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CancelBooking {
                booking_id: id.into(),
                initiator_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records a completed `Payment` of the `Booking` of the current `User`,
    /// confirming the `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the `X-User-Id` header is missing;
    /// - `BOOKING_NOT_EXISTS` - the current `User` has no `Booking` with the
    ///                          specified ID;
    /// - `BOOKING_IN_PACKAGE` - the `Booking` is a part of a
    ///                          `PackageBooking`;
    /// - `INVALID_BOOKING_STATE` - the `Booking` doesn't await its payment;
    /// - `AMOUNT_MISMATCH` - `amount` differs from the `Booking` total price;
    /// - `TRANSACTION_ID_COLLISION` - no unique transaction ID was generated,
    ///                                so the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = %amount,
            booking_id = %booking_id,
            gql.name = "recordPayment",
            method = ?method,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn record_payment(
        booking_id: api::booking::Id,
        method: api::payment::Method,
        amount: Money,
        ctx: &Context,
    ) -> Result<api::Payment, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::RecordPayment {
                booking_id: booking_id.into(),
                initiator_id: my_id.into(),
                method: method.into(),
                amount,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Order of `Flight` seats.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct FlightOrder {
    /// ID of the `Flight` to book.
    pub flight_id: api::flight::Id,

    /// Number of seats to book, from 1 to 10.
    pub passengers: i32,

    /// `TravelClass` of the seats to book.
    pub travel_class: api::flight::TravelClass,
}

impl TryFrom<FlightOrder> for domain::flight::Order {
    type Error = Error;

    fn try_from(order: FlightOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            flight_id: order.flight_id.into(),
            passenger_count: PassengerCount::new(order.passengers)
                .ok_or(api::ValidationError::PassengerCount)?,
            travel_class: order.travel_class.into(),
        })
    }
}

/// Order of `Hotel` rooms.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct HotelOrder {
    /// ID of the `Hotel` to book.
    pub hotel_id: api::hotel::Id,

    /// `Date` to check in at.
    pub check_in: Date,

    /// `Date` to check out at.
    pub check_out: Date,

    /// Number of rooms to book, from 1 to 5.
    pub rooms: i32,

    /// Number of guests to stay, from 1 to 10.
    pub guests: i32,

    /// Special requests of the guests, if any.
    pub special_requests: Option<api::booking::SpecialRequests>,
}

impl TryFrom<HotelOrder> for domain::hotel::Order {
    type Error = Error;

    fn try_from(order: HotelOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            hotel_id: order.hotel_id.into(),
            check_in: order.check_in,
            check_out: order.check_out,
            rooms_count: RoomsCount::new(order.rooms)
                .ok_or(api::ValidationError::RoomsCount)?,
            guests_count: GuestsCount::new(order.guests)
                .ok_or(api::ValidationError::GuestsCount)?,
            special_requests: order.special_requests.map(Into::into),
        })
    }
}

define_error! {
    enum PlacementError {
        #[code = "CAPACITY_EXCEEDED"]
        #[status = CONFLICT]
        #[message = "Not enough seats or rooms left"]
        CapacityExceeded,

        #[code = "BOOKING_IN_PACKAGE"]
        #[status = CONFLICT]
        #[message = "`Booking` is a part of a `PackageBooking`, so the whole \
                     `PackageBooking` must be used instead"]
        BookingInPackage,

        #[code = "REFERENCE_COLLISION"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Failed to generate a unique `Booking` reference, \
                     please retry"]
        ReferenceCollision,

        #[code = "TRANSACTION_ID_COLLISION"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Failed to generate a unique `Payment` transaction ID, \
                     please retry"]
        TransactionIdCollision,
    }
}

impl AsError for command::create_flight_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "FLIGHT_NOT_BOOKABLE"]
                #[status = CONFLICT]
                #[message = "`Flight` has departed or is cancelled"]
                FlightNotBookable,

                #[code = "TRAVEL_CLASS_UNAVAILABLE"]
                #[status = BAD_REQUEST]
                #[message = "`Flight` has no seats of the requested \
                             `TravelClass`"]
                UnavailableClass,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CapacityExceeded(_) => {
                Some(PlacementError::CapacityExceeded.into())
            }
            Self::FlightNotBookable(_) => Some(Error::FlightNotBookable.into()),
            Self::FlightNotExists(_) => {
                Some(api::flight::FlightError::NotExists.into())
            }
            Self::UnavailableClass(_) => Some(Error::UnavailableClass.into()),
            Self::ReferenceCollision => {
                Some(PlacementError::ReferenceCollision.into())
            }
        }
    }
}

impl AsError for command::create_hotel_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CapacityExceeded(_) => {
                Some(PlacementError::CapacityExceeded.into())
            }
            Self::CheckInInPast(_) => {
                Some(api::query::StayError::CheckInInPast.into())
            }
            Self::HotelNotExists(_) => {
                Some(api::hotel::HotelError::NotExists.into())
            }
            Self::InvalidDateRange { .. } => {
                Some(api::query::StayError::InvalidDateRange.into())
            }
            Self::ReferenceCollision => {
                Some(PlacementError::ReferenceCollision.into())
            }
        }
    }
}

impl AsError for command::create_package_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CURRENCY_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "`Flight` and `Hotel` prices are in different \
                             currencies"]
                CurrencyMismatch,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CurrencyMismatch { .. } => {
                Some(Error::CurrencyMismatch.into())
            }
            Self::Flight(e) => e.try_as_error(),
            Self::Hotel(e) => e.try_as_error(),
            Self::ReferenceCollision => {
                Some(PlacementError::ReferenceCollision.into())
            }
        }
    }
}

impl AsError for command::cancel_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_CANCELLED"]
                #[status = CONFLICT]
                #[message = "`Booking` is cancelled already"]
                AlreadyCancelled,

                #[code = "NOT_CANCELLABLE"]
                #[status = CONFLICT]
                #[message = "`Booking` is completed or checked in already"]
                NotCancellable,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AlreadyCancelled(_) => Some(Error::AlreadyCancelled.into()),
            Self::BookingInPackage { .. } => {
                Some(PlacementError::BookingInPackage.into())
            }
            Self::BookingNotExists(_) => {
                Some(api::booking::BookingError::NotExists.into())
            }
            Self::NotCancellable(_) => Some(Error::NotCancellable.into()),
            Self::ResourceNotExists(_) => None,
        }
    }
}

impl AsError for command::record_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "AMOUNT_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "Paid amount differs from the `Booking` total \
                             price"]
                AmountMismatch,

                #[code = "INVALID_BOOKING_STATE"]
                #[status = CONFLICT]
                #[message = "`Booking` doesn't await its payment"]
                InvalidBookingState,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AmountMismatch { .. } => Some(Error::AmountMismatch.into()),
            Self::BookingInPackage { .. } => {
                Some(PlacementError::BookingInPackage.into())
            }
            Self::BookingNotExists(_) => {
                Some(api::booking::BookingError::NotExists.into())
            }
            Self::InvalidBookingState(_) => {
                Some(Error::InvalidBookingState.into())
            }
            Self::TransactionIdCollision => {
                Some(PlacementError::TransactionIdCollision.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use service::command::{
        create_flight_booking, create_hotel_booking, create_package_booking,
        record_payment,
    };

    use crate::AsError as _;

    #[test]
    fn reports_exhausted_keys_as_transient() {
        for err in [
            create_flight_booking::ExecutionError::ReferenceCollision
                .as_error(),
            create_hotel_booking::ExecutionError::ReferenceCollision
                .as_error(),
            create_package_booking::ExecutionError::ReferenceCollision
                .as_error(),
            create_package_booking::ExecutionError::Flight(
                create_flight_booking::ExecutionError::ReferenceCollision,
            )
            .as_error(),
        ] {
            assert_eq!(err.code, "REFERENCE_COLLISION");
            assert_eq!(err.status_code, http::StatusCode::SERVICE_UNAVAILABLE);
        }

        let err =
            record_payment::ExecutionError::TransactionIdCollision.as_error();
        assert_eq!(err.code, "TRANSACTION_ID_COLLISION");
        assert_eq!(err.status_code, http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
