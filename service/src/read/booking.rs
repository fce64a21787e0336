//! [`Booking`] read model definitions.

use derive_more::{Display, From, Into};

#[cfg(doc)]
use crate::domain::Booking;

/// Number of [`Booking`]s completed in a single run.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
pub struct CompletedCount(u64);
