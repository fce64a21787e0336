//! [`City`]-related definitions.

use std::future;

use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A city.
#[derive(Clone, Debug)]
pub struct City {
    /// ID of this [`City`].
    id: Id,

    /// Underlying [`domain::City`].
    city: OnceCell<domain::City>,
}

impl From<domain::City> for City {
    fn from(city: domain::City) -> Self {
        Self {
            id: city.id.into(),
            city: OnceCell::new_with(Some(city)),
        }
    }
}

impl City {
    /// Creates a new [`City`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`City`] with the provided ID exists,
    /// otherwise accessing this [`City`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            city: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::City`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::City`] doesn't exist.
    async fn city(&self, ctx: &Context) -> Result<&domain::City, Error> {
        let id = self.id.into();
        self.city
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::city::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|c| {
                        future::ready(
                            c.ok_or_else(|| CityError::NotExists.into())
                                .map_err(ctx.error()),
                        )
                    })
            })
            .await
    }
}

/// A city.
#[graphql_object(context = Context)]
impl City {
    /// Unique identifier of this `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.city(ctx).await?.name.clone().into())
    }

    /// Country this `City` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.country",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn country(&self, ctx: &Context) -> Result<Country, Error> {
        Ok(self.city(ctx).await?.country.clone().into())
    }

    /// IATA code of the airport of this `City`, if it has one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.airportCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn airport_code(
        &self,
        ctx: &Context,
    ) -> Result<Option<AirportCode>, Error> {
        Ok(self.city(ctx).await?.airport_code.clone().map(Into::into))
    }
}

/// Unique identifier of a `City`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::city::Id)]
#[into(domain::city::Id)]
#[graphql(name = "CityId", transparent)]
pub struct Id(Uuid);

/// Name of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityName", with = scalar::Via::<domain::city::Name>)]
pub struct Name(domain::city::Name);

/// Country of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityCountry", with = scalar::Via::<domain::city::Country>)]
pub struct Country(domain::city::Country);

/// IATA airport code of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CityAirportCode",
    with = scalar::Via::<domain::city::AirportCode>,
)]
pub struct AirportCode(domain::city::AirportCode);

define_error! {
    enum CityError {
        #[code = "CITY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`City` with the specified ID does not exist"]
        NotExists,
    }
}
