//! [`Hotel`] read model definitions.

use common::Money;

use crate::domain::{availability::Quantity, city, hotel::StarRating};
#[cfg(doc)]
use crate::domain::{City, Hotel};

/// Criteria of searching [`Hotel`]s.
#[derive(Clone, Copy, Debug)]
pub struct Search {
    /// ID of the [`City`] to search [`Hotel`]s in.
    pub city_id: city::Id,

    /// Minimum [`Quantity`] of rooms left.
    pub rooms: Quantity,

    /// Minimum [`StarRating`], if any.
    pub min_rating: Option<StarRating>,

    /// Maximum price per night, if any.
    pub max_price: Option<Money>,
}
