//! [`Flight`] read model definitions.

use common::Date;

use crate::domain::{availability::Quantity, city};
#[cfg(doc)]
use crate::domain::{City, Flight};

/// Criteria of searching [`Flight`]s.
#[derive(Clone, Copy, Debug)]
pub struct Search {
    /// ID of the [`City`] to depart from.
    pub source_city_id: city::Id,

    /// ID of the [`City`] to arrive to.
    pub destination_city_id: city::Id,

    /// [`Date`] to depart at.
    pub date: Date,

    /// Minimum [`Quantity`] of seats left.
    pub passengers: Quantity,
}
