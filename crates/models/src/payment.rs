use crate::{
    booking::BookingStatus,
    money::{MINIMUM_PAYMENT, MoneyError, deposit_amount, ensure_non_negative},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How much of a booking has been paid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Partial,
    Refunded,
}

impl PaymentStatus {
    /// Derives the status from what has been paid against `total`
    pub fn derive(total: Decimal, amount_paid: Decimal, refunded: bool) -> Self {
        if refunded {
            Self::Refunded
        } else if amount_paid <= Decimal::ZERO {
            Self::Unpaid
        } else if amount_paid >= total {
            Self::Paid
        } else {
            Self::Partial
        }
    }
}

/// Which payment a customer chose
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    /// The service's deposit percentage of the total
    Deposit,
    /// Everything still owed
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error("deposit payment is not available for this booking")]
    DepositUnavailable,
    #[error("full payment is not available for this booking")]
    FullPaymentUnavailable,
}

/// The state of a booking that payment decisions depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentLedger {
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub deposit_percentage: Decimal,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
}

impl PaymentLedger {
    pub fn amount_due(&self) -> Decimal {
        (self.total - self.amount_paid).max(Decimal::ZERO)
    }
}

/// The pay actions offered for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    pub deposit_amount: Decimal,
    pub amount_due: Decimal,
    /// What would remain owed after paying the deposit
    pub remaining_after_deposit: Decimal,
    pub deposit_enabled: bool,
    pub full_enabled: bool,
}

impl PaymentOptions {
    pub fn compute(ledger: &PaymentLedger) -> Result<Self, MoneyError> {
        ensure_non_negative(ledger.amount_paid)?;
        let deposit = deposit_amount(ledger.total, ledger.deposit_percentage)?;
        let amount_due = ledger.amount_due();
        let open = ledger.booking_status.is_open();

        Ok(Self {
            deposit_amount: deposit,
            amount_due,
            remaining_after_deposit: (amount_due - deposit).max(Decimal::ZERO),
            deposit_enabled: open
                && deposit >= MINIMUM_PAYMENT
                && ledger.payment_status == PaymentStatus::Unpaid,
            full_enabled: open && amount_due >= MINIMUM_PAYMENT,
        })
    }

    /// The amount charged for `kind`, if that action is enabled
    pub fn amount_for(&self, kind: PaymentKind) -> Result<Decimal, PaymentError> {
        match kind {
            PaymentKind::Deposit if self.deposit_enabled => Ok(self.deposit_amount),
            PaymentKind::Deposit => Err(PaymentError::DepositUnavailable),
            PaymentKind::Full if self.full_enabled => Ok(self.amount_due),
            PaymentKind::Full => Err(PaymentError::FullPaymentUnavailable),
        }
    }
}

/// A ledger after a payment of `amount` has been applied
pub fn apply_payment(ledger: &PaymentLedger, amount: Decimal) -> Result<PaymentLedger, MoneyError> {
    let amount = ensure_non_negative(amount)?;
    let amount_paid = (ledger.amount_paid + amount).min(ledger.total);

    Ok(PaymentLedger {
        amount_paid,
        payment_status: PaymentStatus::derive(ledger.total, amount_paid, false),
        booking_status: ledger.booking_status.after_payment(),
        ..*ledger
    })
}
