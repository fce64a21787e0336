//! [`Attraction`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A place worth visiting.
#[derive(Clone, Debug, From)]
pub struct Attraction(domain::Attraction);

/// A place worth visiting.
#[graphql_object(context = Context)]
impl Attraction {
    /// Unique identifier of this `Attraction`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Attraction`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// `City` this `Attraction` is located in.
    pub fn city(&self) -> api::City {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::City::new_unchecked(self.0.city_id)
        }
    }

    /// Category of this `Attraction`.
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Description of this `Attraction`.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Entry fee of this `Attraction`.
    ///
    /// `null` means that the entry is free.
    pub fn entry_fee(&self) -> Option<Money> {
        self.0.entry_fee
    }
}

/// Unique identifier of an `Attraction`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::attraction::Id)]
#[into(domain::attraction::Id)]
#[graphql(name = "AttractionId", transparent)]
pub struct Id(Uuid);

/// Name of an `Attraction`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AttractionName",
    with = scalar::Via::<domain::attraction::Name>,
)]
pub struct Name(domain::attraction::Name);

/// Description of an `Attraction`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AttractionDescription",
    with = scalar::Via::<domain::attraction::Description>,
)]
pub struct Description(domain::attraction::Description);

/// Category of an `Attraction`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "AttractionCategory")]
pub enum Category {
    /// Historical site.
    Historical,

    /// Museum.
    Museum,

    /// Park.
    Park,

    /// Religious site.
    Religious,

    /// Entertainment venue.
    Entertainment,

    /// Shopping area.
    Shopping,

    /// Restaurant.
    Restaurant,

    /// Anything else.
    Other,
}

impl From<domain::attraction::Category> for Category {
    fn from(category: domain::attraction::Category) -> Self {
        use domain::attraction::Category as C;
        match category {
            C::Historical => Self::Historical,
            C::Museum => Self::Museum,
            C::Park => Self::Park,
            C::Religious => Self::Religious,
            C::Entertainment => Self::Entertainment,
            C::Shopping => Self::Shopping,
            C::Restaurant => Self::Restaurant,
            C::Other => Self::Other,
        }
    }
}

impl From<Category> for domain::attraction::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Historical => Self::Historical,
            Category::Museum => Self::Museum,
            Category::Park => Self::Park,
            Category::Religious => Self::Religious,
            Category::Entertainment => Self::Entertainment,
            Category::Shopping => Self::Shopping,
            Category::Restaurant => Self::Restaurant,
            Category::Other => Self::Other,
        }
    }
}
