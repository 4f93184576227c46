pub mod booking;
pub mod invoice;
pub mod pagination;
pub mod quote;
pub mod time_slot;
pub mod user;
pub mod venue;
