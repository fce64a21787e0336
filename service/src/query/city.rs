//! [`Query`] collection related to a single [`City`].

use common::operations::By;

use crate::domain::{city, City};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`City`] by its [`city::Id`].
pub type ById = DatabaseQuery<By<Option<City>, city::Id>>;
