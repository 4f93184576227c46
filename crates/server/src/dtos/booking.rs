use super::{invoice::InvoiceResponse, pagination::page_request};
use crate::error::ApiError;
use chrono::NaiveDateTime;
use database::{
    entities::{booking, payment},
    services::booking::{BookingDetail, BookingFilter, PaymentReceipt},
};
use models::{
    booking::{BookingAction, BookingStatus},
    listing::PageRequest,
    money::MINIMUM_PAYMENT,
    payment::{PaymentKind, PaymentOptions, PaymentStatus},
    venue::ServiceType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub service_id: Uuid,
    #[schema(value_type = String, example = "EVENTCENTER")]
    pub service_type: ServiceType,
    pub customer_id: Uuid,
    pub booking_reference: String,
    pub sub_total: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub amount_due: Decimal,
    pub deposit_percentage: Decimal,
    #[schema(value_type = String, example = "UNPAID")]
    pub payment_status: PaymentStatus,
    #[schema(value_type = String, example = "PENDING")]
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<booking::Model> for BookingResponse {
    fn from(booking: booking::Model) -> Self {
        Self {
            amount_due: booking.ledger().amount_due(),
            id: booking.id,
            quote_id: booking.quote_id,
            service_id: booking.service_id,
            service_type: booking.service_type,
            customer_id: booking.customer_id,
            booking_reference: booking.booking_reference,
            sub_total: booking.sub_total,
            discount: booking.discount,
            total: booking.total,
            amount_paid: booking.amount_paid,
            deposit_percentage: booking.deposit_percentage,
            payment_status: booking.payment_status,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    #[schema(value_type = String, example = "DEPOSIT")]
    pub kind: PaymentKind,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<payment::Model> for PaymentResponse {
    fn from(payment: payment::Model) -> Self {
        Self {
            id: payment.id,
            booking_id: payment.booking_id,
            kind: payment.kind,
            amount: payment.amount,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub invoice: Option<InvoiceResponse>,
    pub payments: Vec<PaymentResponse>,
}

impl From<BookingDetail> for BookingDetailResponse {
    fn from(detail: BookingDetail) -> Self {
        Self {
            booking: detail.booking.into(),
            invoice: detail.invoice.map(Into::into),
            payments: detail.payments.into_iter().map(Into::into).collect(),
        }
    }
}

/// What the booking page offers the customer to pay
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptionsResponse {
    pub deposit_amount: Decimal,
    pub amount_due: Decimal,
    pub remaining_after_deposit: Decimal,
    pub deposit_enabled: bool,
    pub full_enabled: bool,
    /// Smallest amount either action accepts
    pub minimum_payment: Decimal,
}

impl From<PaymentOptions> for PaymentOptionsResponse {
    fn from(options: PaymentOptions) -> Self {
        Self {
            deposit_amount: options.deposit_amount,
            amount_due: options.amount_due,
            remaining_after_deposit: options.remaining_after_deposit,
            deposit_enabled: options.deposit_enabled,
            full_enabled: options.full_enabled,
            minimum_payment: MINIMUM_PAYMENT,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    #[schema(value_type = String, example = "DEPOSIT")]
    pub kind: PaymentKind,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentReceiptResponse {
    pub payment: PaymentResponse,
    pub booking: BookingResponse,
    pub invoice: InvoiceResponse,
}

impl From<PaymentReceipt> for PaymentReceiptResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            payment: receipt.payment.into(),
            booking: receipt.booking.into(),
            invoice: receipt.invoice.into(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    #[schema(value_type = String, example = "CANCEL")]
    pub action: BookingAction,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingQueryParams {
    #[param(value_type = Option<String>)]
    pub status: Option<BookingStatus>,
    #[param(value_type = Option<String>)]
    pub payment_status: Option<PaymentStatus>,
    #[param(value_type = Option<String>)]
    pub service_type: Option<ServiceType>,
    pub service_id: Option<Uuid>,
    /// Matched against the booking reference
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl BookingQueryParams {
    pub fn into_parts(self) -> Result<(BookingFilter, PageRequest), ApiError> {
        let request = page_request(self.page, self.per_page)?;
        let filter = BookingFilter {
            status: self.status,
            payment_status: self.payment_status,
            service_type: self.service_type,
            service_id: self.service_id,
            search: self.search,
        };
        Ok((filter, request))
    }
}
