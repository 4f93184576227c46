use crate::lifecycle::Lifecycle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Reservation state of a booking. Independent of its payment status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created from an approved quote, nothing paid yet
    Pending,
    /// Secured by at least one payment
    Booked,
    Cancelled,
    /// The event has taken place
    Completed,
}

impl BookingStatus {
    /// Open bookings still accept payments and changes
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// Status after a payment has been recorded
    pub fn after_payment(self) -> Self {
        match self {
            Self::Pending => Self::Booked,
            other => other,
        }
    }
}

impl Lifecycle for BookingStatus {
    const ENTITY: &'static str = "booking";

    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Booked)
                | (Self::Pending, Self::Cancelled)
                | (Self::Booked, Self::Completed)
                | (Self::Booked, Self::Cancelled)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

/// Manual status changes an admin can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingAction {
    Cancel,
    Complete,
}

impl BookingAction {
    pub fn target_status(self) -> BookingStatus {
        match self {
            Self::Cancel => BookingStatus::Cancelled,
            Self::Complete => BookingStatus::Completed,
        }
    }
}

/// Human-facing reference, e.g. `BQ-20250612-3F2A9C01`
pub fn booking_reference(id: Uuid, created_on: NaiveDate) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("BQ-{}-{}", created_on.format("%Y%m%d"), &simple[..8])
}
