//! Background [`Task`]s definitions.

mod background;
pub mod complete_past_bookings;

pub use common::Handler as Task;

pub use self::{
    background::Background, complete_past_bookings::CompletePastBookings,
};
