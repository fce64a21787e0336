//! Read entities definitions.

pub mod attraction;
pub mod availability;
pub mod booking;
pub mod flight;
pub mod hotel;

/// Outcome of inserting an entity having a unique key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Insertion {
    /// Entity was inserted.
    Inserted,

    /// Unique key of the entity is occupied already, so nothing was inserted.
    Occupied,
}
