use crate::{booking::BookingStatus, payment::PaymentStatus};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Default number of days between issuing an invoice and its due date
pub const DEFAULT_DUE_DAYS: u64 = 14;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
    /// The booking was cancelled or refunded
    Void,
}

impl InvoiceStatus {
    pub fn for_booking(payment_status: PaymentStatus, booking_status: BookingStatus) -> Self {
        if booking_status == BookingStatus::Cancelled {
            return Self::Void;
        }

        match payment_status {
            PaymentStatus::Unpaid => Self::Unpaid,
            PaymentStatus::Partial => Self::PartiallyPaid,
            PaymentStatus::Paid => Self::Paid,
            PaymentStatus::Refunded => Self::Void,
        }
    }
}

/// Billing settings applied to every invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTerms {
    pub currency: String,
    pub due_days: u64,
}

impl Default for InvoiceTerms {
    fn default() -> Self {
        Self {
            currency: "NGN".to_string(),
            due_days: DEFAULT_DUE_DAYS,
        }
    }
}

impl InvoiceTerms {
    /// Due `due_days` after issue, but no later than the event itself.
    /// Never earlier than the issue date.
    pub fn due_date(&self, issue_date: NaiveDate, event_date: Option<NaiveDate>) -> NaiveDate {
        let standard = issue_date
            .checked_add_days(Days::new(self.due_days))
            .unwrap_or(NaiveDate::MAX);

        match event_date {
            Some(event_date) => standard.min(event_date).max(issue_date),
            None => standard,
        }
    }
}

/// Invoice figures derived from a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub amount_due: Decimal,
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// The booking fields an invoice is derived from
#[derive(Debug, Clone, Copy)]
pub struct InvoiceSource<'a> {
    pub booking_reference: &'a str,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
}

impl InvoiceDraft {
    pub fn derive(
        source: InvoiceSource<'_>,
        terms: &InvoiceTerms,
        issue_date: NaiveDate,
        event_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            invoice_number: invoice_number(source.booking_reference),
            amount_due: amount_due(source),
            currency: terms.currency.clone(),
            issue_date,
            due_date: terms.due_date(issue_date, event_date),
            status: InvoiceStatus::for_booking(source.payment_status, source.booking_status),
        }
    }
}

/// Outstanding amount; void invoices owe nothing
pub fn amount_due(source: InvoiceSource<'_>) -> Decimal {
    match InvoiceStatus::for_booking(source.payment_status, source.booking_status) {
        InvoiceStatus::Void => Decimal::ZERO,
        _ => (source.total - source.amount_paid).max(Decimal::ZERO),
    }
}

pub fn invoice_number(booking_reference: &str) -> String {
    format!("INV-{booking_reference}")
}
