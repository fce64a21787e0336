//! Availability-related definitions.

use common::Money;
use juniper::graphql_object;
use service::read;

use crate::Context;

/// Point-in-time availability of `Flight` seats or `Hotel` rooms.
///
/// May become stale right after being read, so booking re-checks it.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot(pub(crate) read::availability::Snapshot);

/// Point-in-time availability of `Flight` seats or `Hotel` rooms.
#[graphql_object(name = "Availability", context = Context)]
impl Snapshot {
    /// Whether the requested quantity fits into the available units.
    pub fn available(&self) -> bool {
        self.0.available
    }

    /// Number of units still available.
    pub fn remaining(&self) -> i32 {
        i32::try_from(self.0.remaining).unwrap_or(i32::MAX)
    }

    /// Price of a single unit: an economy seat or a room per night.
    pub fn unit_price(&self) -> Money {
        self.0.unit_price
    }
}
