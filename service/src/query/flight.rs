//! [`Query`] collection related to a single [`Flight`].

use common::operations::By;

use crate::domain::{flight, Flight};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Flight`] by its [`flight::Id`].
pub type ById = DatabaseQuery<By<Option<Flight>, flight::Id>>;
