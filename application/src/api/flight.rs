//! [`Flight`]-related definitions.

use common::{Date, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, define_error, Context};

/// A scheduled flight.
#[derive(Clone, Debug, From)]
pub struct Flight(domain::Flight);

/// A scheduled flight.
#[graphql_object(context = Context)]
impl Flight {
    /// Unique identifier of this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Number of this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn number(&self) -> Number {
        self.0.number.clone().into()
    }

    /// `Airline` operating this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.airline",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn airline(&self) -> api::Airline {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::Airline::new_unchecked(self.0.airline_id)
        }
    }

    /// `City` this `Flight` departs from.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.source",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn source(&self) -> api::City {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::City::new_unchecked(self.0.source_city_id)
        }
    }

    /// `City` this `Flight` arrives to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.destination",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn destination(&self) -> api::City {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::City::new_unchecked(self.0.destination_city_id)
        }
    }

    /// `Date` this `Flight` departs at.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.date",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn date(&self) -> Date {
        self.0.date
    }

    /// Local departure time of this `Flight` in a `HH:MM` format.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.departureTime",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn departure_time(&self) -> String {
        let t = self.0.departure_time;
        format!("{:02}:{:02}", t.hour(), t.minute())
    }

    /// Local arrival time of this `Flight` in a `HH:MM` format.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.arrivalTime",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn arrival_time(&self) -> String {
        let t = self.0.arrival_time;
        format!("{:02}:{:02}", t.hour(), t.minute())
    }

    /// Price of a single seat in the provided `TravelClass`.
    ///
    /// `null` means that this `Flight` has no seats of the `TravelClass`.
    #[tracing::instrument(
        skip_all,
        fields(
            class = ?class,
            gql.name = "Flight.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price(&self, class: TravelClass) -> Option<Money> {
        self.0.unit_price(class.into())
    }

    /// Total number of seats of this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.totalSeats",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_seats(&self) -> i32 {
        i32::try_from(self.0.capacity.total()).unwrap_or(i32::MAX)
    }

    /// Number of seats still available on this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.availableSeats",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn available_seats(&self) -> i32 {
        i32::try_from(self.0.capacity.available()).unwrap_or(i32::MAX)
    }

    /// Status of this `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Flight.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }
}

/// Unique identifier of a `Flight`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::flight::Id)]
#[into(domain::flight::Id)]
#[graphql(name = "FlightId", transparent)]
pub struct Id(Uuid);

/// Number of a `Flight`, like `SU2454`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "FlightNumber", with = scalar::Via::<domain::flight::Number>)]
pub struct Number(domain::flight::Number);

/// Status of a `Flight`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "FlightStatus")]
pub enum Status {
    /// Departs on time.
    Scheduled,

    /// Departs later than scheduled.
    Delayed,

    /// Won't depart.
    Cancelled,

    /// Boards its passengers.
    Boarding,

    /// Is in the air.
    Departed,

    /// Has arrived.
    Arrived,
}

impl From<domain::flight::Status> for Status {
    fn from(status: domain::flight::Status) -> Self {
        use domain::flight::Status as S;
        match status {
            S::Scheduled => Self::Scheduled,
            S::Delayed => Self::Delayed,
            S::Cancelled => Self::Cancelled,
            S::Boarding => Self::Boarding,
            S::Departed => Self::Departed,
            S::Arrived => Self::Arrived,
        }
    }
}

/// Travel class of a `Flight` seat.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum TravelClass {
    /// Economy class.
    Economy,

    /// Business class.
    Business,
}

impl From<domain::flight::TravelClass> for TravelClass {
    fn from(class: domain::flight::TravelClass) -> Self {
        use domain::flight::TravelClass as C;
        match class {
            C::Economy => Self::Economy,
            C::Business => Self::Business,
        }
    }
}

impl From<TravelClass> for domain::flight::TravelClass {
    fn from(class: TravelClass) -> Self {
        match class {
            TravelClass::Economy => Self::Economy,
            TravelClass::Business => Self::Business,
        }
    }
}

define_error! {
    enum FlightError {
        #[code = "FLIGHT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Flight` with the specified ID does not exist"]
        NotExists,
    }
}
