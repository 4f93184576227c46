pub mod booking;
pub mod catering;
pub mod event_center;
pub mod invoice;
pub mod payment;
pub mod quote;
pub mod quote_time_slot;
pub mod time_slot;
pub mod user;
