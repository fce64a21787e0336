//! [`Attraction`] definitions.

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::city;
#[cfg(doc)]
use crate::domain::City;

/// Place worth visiting in a [`City`].
#[derive(Clone, Debug)]
pub struct Attraction {
    /// ID of this [`Attraction`].
    pub id: Id,

    /// [`Name`] of this [`Attraction`].
    pub name: Name,

    /// ID of the [`City`] this [`Attraction`] is located in.
    pub city_id: city::Id,

    /// [`Category`] of this [`Attraction`].
    pub category: Category,

    /// [`Description`] of this [`Attraction`].
    pub description: Description,

    /// Entry fee of this [`Attraction`].
    ///
    /// [`None`] means that the entry is free.
    pub entry_fee: Option<Money>,
}

/// ID of an [`Attraction`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of an [`Attraction`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 200
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Attraction` name")
    }
}

/// Description of an [`Attraction`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `desc` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(desc: impl Into<String>) -> Self {
        Self(desc.into())
    }

    /// Creates a new [`Description`] if the given `desc` is valid.
    #[must_use]
    pub fn new(desc: impl Into<String>) -> Option<Self> {
        let desc = desc.into();
        Self::check(&desc).then_some(Self(desc))
    }

    /// Checks whether the given `desc` is a valid [`Description`].
    fn check(desc: impl AsRef<str>) -> bool {
        desc.as_ref().trim() == desc.as_ref()
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Attraction` description")
    }
}

define_kind! {
    #[doc = "Category of an [`Attraction`]."]
    enum Category {
        #[doc = "Historical site."]
        Historical = 1,

        #[doc = "Museum."]
        Museum = 2,

        #[doc = "Park or garden."]
        Park = 3,

        #[doc = "Religious site."]
        Religious = 4,

        #[doc = "Entertainment venue."]
        Entertainment = 5,

        #[doc = "Shopping area."]
        Shopping = 6,

        #[doc = "Restaurant."]
        Restaurant = 7,

        #[doc = "Anything else."]
        Other = 8,
    }
}
