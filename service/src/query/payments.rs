//! [`Query`] collection related to the multiple [`Payment`]s.

use common::operations::By;

use crate::domain::{booking, Payment};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::DatabaseQuery;

/// Queries the [`Payment`]s of a [`Booking`], oldest first.
pub type ByBooking = DatabaseQuery<By<Vec<Payment>, booking::Id>>;
