//! [`Query`] collection related to the multiple [`Attraction`]s.

use common::operations::By;

use crate::{domain::Attraction, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Lists [`Attraction`]s matching a [`read::attraction::Filter`], ordered by
/// their city name and then by their own name.
pub type List = DatabaseQuery<By<Vec<Attraction>, read::attraction::Filter>>;
