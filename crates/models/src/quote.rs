use crate::{
    lifecycle::Lifecycle,
    money::{MoneyError, ensure_non_negative},
    venue::ServiceType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Where a quote is in its review
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    /// Awaiting a decision from the provider
    Pending,
    /// Accepted; a booking has been created
    Approved,
    /// Declined by the provider
    Rejected,
}

impl Lifecycle for QuoteStatus {
    const ENTITY: &'static str = "quote";

    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Reasons a quote request is refused before it reaches the database
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteRequestError {
    #[error("at least one time slot must be requested")]
    NoTimeSlots,
    #[error("time slot {0} was requested more than once")]
    DuplicateTimeSlot(Uuid),
    #[error("budget is invalid: {0}")]
    InvalidBudget(#[source] MoneyError),
    #[error("billing address must not be blank")]
    MissingBillingAddress,
    #[error("the terms and conditions must be accepted")]
    TermsNotAccepted,
    #[error("the cancellation policy must be accepted")]
    CancellationPolicyNotAccepted,
}

/// What a customer submits when asking for a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service_id: Uuid,
    pub service_type: ServiceType,
    pub time_slot_ids: Vec<Uuid>,
    pub budget: Decimal,
    pub billing_address: String,
    pub accept_terms: bool,
    pub accept_cancellation_policy: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), QuoteRequestError> {
        if self.time_slot_ids.is_empty() {
            return Err(QuoteRequestError::NoTimeSlots);
        }

        let mut seen = HashSet::with_capacity(self.time_slot_ids.len());
        for id in &self.time_slot_ids {
            if !seen.insert(id) {
                return Err(QuoteRequestError::DuplicateTimeSlot(*id));
            }
        }

        ensure_non_negative(self.budget).map_err(QuoteRequestError::InvalidBudget)?;

        if self.billing_address.trim().is_empty() {
            return Err(QuoteRequestError::MissingBillingAddress);
        }
        if !self.accept_terms {
            return Err(QuoteRequestError::TermsNotAccepted);
        }
        if !self.accept_cancellation_policy {
            return Err(QuoteRequestError::CancellationPolicyNotAccepted);
        }

        Ok(())
    }
}

/// A provider's answer to a pending quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteDecision {
    Approve {
        #[serde(default)]
        discount: Option<Decimal>,
    },
    Reject {
        #[serde(default)]
        reason: Option<String>,
    },
}

impl QuoteDecision {
    pub fn target_status(&self) -> QuoteStatus {
        match self {
            Self::Approve { .. } => QuoteStatus::Approved,
            Self::Reject { .. } => QuoteStatus::Rejected,
        }
    }
}
