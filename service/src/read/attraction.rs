//! [`Attraction`] read model definitions.

use common::Money;

use crate::domain::{attraction::Category, city};
#[cfg(doc)]
use crate::domain::{Attraction, City};

/// Filter of listing [`Attraction`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// ID of the [`City`] to list [`Attraction`]s in, if any.
    pub city_id: Option<city::Id>,

    /// [`Category`] of the listed [`Attraction`]s, if any.
    pub category: Option<Category>,

    /// Maximum entry fee, if any.
    ///
    /// Free [`Attraction`]s always pass this filter.
    pub max_fee: Option<Money>,
}
