//! [`Query`] collection related to the multiple [`Booking`]s.

use common::operations::By;

use crate::domain::{user, Booking};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries the top-level [`Booking`]s of a [`User`], newest first.
///
/// Sub-bookings of a package are returned inside their package only.
pub type ByUser = DatabaseQuery<By<Vec<Booking>, user::Id>>;
