//! Domain types and calculations for the banquet marketplace.
//!
//! Nothing in this crate performs I/O. The `database` feature adds sea-orm
//! value conversions so the status enums can be stored as text columns.

pub mod booking;
pub mod invoice;
pub mod lifecycle;
pub mod listing;
pub mod money;
pub mod payment;
pub mod policy;
pub mod quote;
pub mod time_slot;
pub mod venue;

#[cfg(feature = "database")]
mod database;
