//! [`Airline`]-related definitions.

use std::future;

use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// An airline.
#[derive(Clone, Debug)]
pub struct Airline {
    /// ID of this [`Airline`].
    id: Id,

    /// Underlying [`domain::Airline`].
    airline: OnceCell<domain::Airline>,
}

impl From<domain::Airline> for Airline {
    fn from(airline: domain::Airline) -> Self {
        Self {
            id: airline.id.into(),
            airline: OnceCell::new_with(Some(airline)),
        }
    }
}

impl Airline {
    /// Creates a new [`Airline`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Airline`] with the provided ID exists,
    /// otherwise accessing this [`Airline`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            airline: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Airline`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Airline`] doesn't exist.
    async fn airline(&self, ctx: &Context) -> Result<&domain::Airline, Error> {
        let id = self.id.into();
        self.airline
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::airline::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|c| {
                        future::ready(
                            c.ok_or_else(|| AirlineError::NotExists.into())
                                .map_err(ctx.error()),
                        )
                    })
            })
            .await
    }
}

/// An airline.
#[graphql_object(context = Context)]
impl Airline {
    /// Unique identifier of this `Airline`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Airline.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Airline`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Airline.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.airline(ctx).await?.name.clone().into())
    }

    /// Two-letter IATA code of this `Airline`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Airline.code",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn code(&self, ctx: &Context) -> Result<Code, Error> {
        Ok(self.airline(ctx).await?.code.clone().into())
    }
}

/// Unique identifier of an `Airline`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::airline::Id)]
#[into(domain::airline::Id)]
#[graphql(name = "AirlineId", transparent)]
pub struct Id(Uuid);

/// Name of an `Airline`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AirlineName", with = scalar::Via::<domain::airline::Name>)]
pub struct Name(domain::airline::Name);

/// IATA code of an `Airline`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AirlineCode", with = scalar::Via::<domain::airline::Code>)]
pub struct Code(domain::airline::Code);

define_error! {
    enum AirlineError {
        #[code = "AIRLINE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Airline` with the specified ID does not exist"]
        NotExists,
    }
}
