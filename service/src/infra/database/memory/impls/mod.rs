//! [`Database`] implementations.
//!
//! [`Database`]: crate::infra::Database

mod availability;
mod booking;
mod catalog;
mod payment;
