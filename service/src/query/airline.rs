//! [`Query`] collection related to a single [`Airline`].

use common::operations::By;

use crate::domain::{airline, Airline};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Airline`] by its [`airline::Id`].
pub type ById = DatabaseQuery<By<Option<Airline>, airline::Id>>;
