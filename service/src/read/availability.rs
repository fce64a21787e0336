//! Availability read model definitions.

use common::Money;

#[cfg(doc)]
use crate::domain::availability::{Quantity, Resource};

/// Point-in-time view on the availability of a [`Resource`].
///
/// May become stale right after being read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// Whether the requested [`Quantity`] fits into the available units.
    pub available: bool,

    /// Number of units available.
    pub remaining: u32,

    /// Price of a single unit (economy seat or room per night).
    pub unit_price: Money,
}
