use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeSlotError {
    #[error("time slot must end after it starts ({start} >= {end})")]
    EmptyWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("time slot overlaps an existing slot from {start} to {end}")]
    Overlap {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A half-open `[start, end)` window a service can be booked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl SlotWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeSlotError> {
        if start >= end {
            return Err(TimeSlotError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Fails if `self` overlaps any of `existing`
    pub fn ensure_free<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a SlotWindow>,
    ) -> Result<(), TimeSlotError> {
        match existing.into_iter().find(|slot| self.overlaps(slot)) {
            Some(clash) => Err(TimeSlotError::Overlap {
                start: clash.start,
                end: clash.end,
            }),
            None => Ok(()),
        }
    }
}

/// The calendar date of the earliest slot
pub fn first_event_date(starts: impl IntoIterator<Item = NaiveDateTime>) -> Option<NaiveDate> {
    starts.into_iter().min().map(|start| start.date())
}
