use super::pagination::{Paginated, page_request};
use crate::error::ApiError;
use chrono::NaiveDate;
use database::entities::invoice;
use models::{invoice::InvoiceStatus, listing::PageRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub amount_due: Decimal,
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[schema(value_type = String, example = "PARTIALLY_PAID")]
    pub status: InvoiceStatus,
}

impl From<invoice::Model> for InvoiceResponse {
    fn from(invoice: invoice::Model) -> Self {
        Self {
            id: invoice.id,
            booking_id: invoice.booking_id,
            invoice_number: invoice.invoice_number,
            amount_due: invoice.amount_due,
            currency: invoice.currency,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            status: invoice.status,
        }
    }
}

/// A single invoice when `bookingId` is given, otherwise a page of invoices
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum InvoiceLookup {
    One(InvoiceResponse),
    Page(Paginated<InvoiceResponse>),
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InvoiceQueryParams {
    pub booking_id: Option<Uuid>,
    #[param(value_type = Option<String>)]
    pub status: Option<InvoiceStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl InvoiceQueryParams {
    pub fn page(&self) -> Result<PageRequest, ApiError> {
        page_request(self.page, self.per_page)
    }
}
