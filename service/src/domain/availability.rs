//! Availability ledger definitions.
//!
//! Every [`Flight`] and [`Hotel`] owns a finite [`Capacity`] (seats and rooms
//! respectively). Bookings consume it by [`Reserve`]ing a [`Quantity`] and
//! give it back on cancellation by [`Release`]ing the same [`Quantity`].

use std::num::NonZeroU16;

use common::define_kind;
use derive_more::{Display, From, Into};

use crate::domain::{flight, hotel};
#[cfg(doc)]
use crate::domain::{Flight, Hotel};

/// Resource having a finite [`Capacity`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, PartialEq)]
pub enum Resource {
    /// Seats of a [`Flight`].
    #[display("Flight(id: {_0})")]
    Flight(flight::Id),

    /// Rooms of a [`Hotel`].
    #[display("Hotel(id: {_0})")]
    Hotel(hotel::Id),
}

impl Resource {
    /// Returns [`Kind`] of this [`Resource`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Flight(_) => Kind::Flight,
            Self::Hotel(_) => Kind::Hotel,
        }
    }
}

define_kind! {
    #[doc = "Kind of a [`Resource`]."]
    enum Kind {
        #[doc = "[`Flight`] seats."]
        Flight = 1,

        #[doc = "[`Hotel`] rooms."]
        Hotel = 2,
    }
}

/// Positive number of [`Resource`] units.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Quantity(NonZeroU16);

impl Quantity {
    /// Creates a new [`Quantity`] if the given `units` is not zero.
    #[must_use]
    pub fn new(units: u16) -> Option<Self> {
        NonZeroU16::new(units).map(Self)
    }

    /// Returns the number of units in this [`Quantity`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// Total and still available units of a [`Resource`].
///
/// The number of available units never exceeds the total one.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{available}/{total}")]
pub struct Capacity {
    /// Total number of units.
    total: u32,

    /// Number of units not reserved yet.
    available: u32,
}

impl Capacity {
    /// Creates a new [`Capacity`] if `available` doesn't exceed `total`.
    #[must_use]
    pub const fn new(total: u32, available: u32) -> Option<Self> {
        if available > total {
            None
        } else {
            Some(Self { total, available })
        }
    }

    /// Creates a new fully available [`Capacity`] of `total` units.
    #[must_use]
    pub const fn full(total: u32) -> Self {
        Self {
            total,
            available: total,
        }
    }

    /// Returns the total number of units.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.total
    }

    /// Returns the number of units not reserved yet.
    #[must_use]
    pub const fn available(self) -> u32 {
        self.available
    }

    /// Checks whether the provided [`Quantity`] can be reserved.
    #[must_use]
    pub fn fits(self, quantity: Quantity) -> bool {
        u32::from(quantity.get()) <= self.available
    }

    /// Reserves the provided [`Quantity`] of units.
    ///
    /// # Errors
    ///
    /// Returns this [`Capacity`] untouched if it has not enough available
    /// units.
    pub fn reserve(self, quantity: Quantity) -> Result<Self, Self> {
        let quantity = u32::from(quantity.get());
        if quantity > self.available {
            return Err(self);
        }
        Ok(Self {
            total: self.total,
            available: self.available - quantity,
        })
    }

    /// Releases the provided [`Quantity`] of units back.
    ///
    /// The result never exceeds [`Capacity::total()`]: the surplus is cut off
    /// and returned alongside, being non-zero only if more units are released
    /// than were ever reserved.
    #[must_use]
    pub fn release(self, quantity: Quantity) -> (Self, u32) {
        let wanted = self.available.saturating_add(u32::from(quantity.get()));
        let available = wanted.min(self.total);
        (
            Self {
                total: self.total,
                available,
            },
            wanted - available,
        )
    }
}

/// Operation of reserving a [`Quantity`] of a [`Resource`].
#[derive(Clone, Copy, Debug)]
pub struct Reserve {
    /// [`Resource`] to reserve units of.
    pub resource: Resource,

    /// [`Quantity`] of units to reserve.
    pub quantity: Quantity,
}

/// Outcome of a [`Reserve`] operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reservation {
    /// Units were reserved, resulting into the provided [`Capacity`].
    Reserved(Capacity),

    /// Not enough units are available in the provided [`Capacity`].
    Insufficient(Capacity),
}

/// Operation of releasing a [`Quantity`] of a [`Resource`].
#[derive(Clone, Copy, Debug)]
pub struct Release {
    /// [`Resource`] to release units of.
    pub resource: Resource,

    /// [`Quantity`] of units to release.
    pub quantity: Quantity,
}

/// Outcome of a [`Release`] operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Released {
    /// [`Capacity`] after releasing.
    pub capacity: Capacity,

    /// Number of units cut off to not exceed [`Capacity::total()`].
    pub overflow: u32,
}

#[cfg(test)]
mod spec {
    use proptest::{collection::vec, prelude::*};

    use super::{Capacity, Quantity};

    fn quantity(units: u16) -> Quantity {
        Quantity::new(units).unwrap()
    }

    #[test]
    fn rejects_overfilled() {
        assert!(Capacity::new(3, 3).is_some());
        assert!(Capacity::new(3, 0).is_some());
        assert!(Capacity::new(0, 0).is_some());

        assert!(Capacity::new(3, 4).is_none());
    }

    #[test]
    fn reserves() {
        let seats = Capacity::new(10, 3).unwrap();

        assert_eq!(
            seats.reserve(quantity(3)),
            Ok(Capacity::new(10, 0).unwrap()),
        );
        assert_eq!(
            seats.reserve(quantity(1)),
            Ok(Capacity::new(10, 2).unwrap()),
        );
        assert_eq!(seats.reserve(quantity(5)), Err(seats));
    }

    #[test]
    fn releases_with_clamping() {
        let rooms = Capacity::new(5, 4).unwrap();

        assert_eq!(rooms.release(quantity(1)), (Capacity::full(5), 0));
        assert_eq!(rooms.release(quantity(3)), (Capacity::full(5), 2));
    }

    #[derive(Clone, Copy, Debug)]
    enum Step {
        Reserve(u16),
        Release(u16),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (1..20_u16).prop_map(Step::Reserve),
            (1..20_u16).prop_map(Step::Release),
        ]
    }

    proptest! {
        #[test]
        fn never_exceeds_total(
            total in 0..100_u32,
            steps in vec(step(), 0..50),
        ) {
            let mut capacity = Capacity::full(total);
            for step in steps {
                capacity = match step {
                    Step::Reserve(q) => capacity
                        .reserve(quantity(q))
                        .unwrap_or_else(|c| c),
                    Step::Release(q) => capacity.release(quantity(q)).0,
                };
                prop_assert!(capacity.available() <= capacity.total());
                prop_assert_eq!(capacity.total(), total);
            }
        }

        #[test]
        fn release_restores_reserve(
            total in 1..100_u32,
            taken in 0..100_u32,
            q in 1..100_u16,
        ) {
            let available = total - taken.min(total);
            let before = Capacity::new(total, available).unwrap();

            if let Ok(after) = before.reserve(quantity(q)) {
                prop_assert_eq!(after.release(quantity(q)), (before, 0));
            } else {
                prop_assert!(u32::from(q) > available);
            }
        }
    }
}
