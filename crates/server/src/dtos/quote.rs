use super::{booking::BookingResponse, pagination::page_request, time_slot::TimeSlotResponse};
use crate::error::ApiError;
use chrono::NaiveDateTime;
use database::{
    entities::quote,
    services::quote::{QuoteDetail, QuoteFilter},
};
use models::{
    listing::PageRequest,
    quote::{QuoteDecision, QuoteRequest, QuoteStatus},
    venue::ServiceType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    pub service_id: Uuid,
    #[schema(value_type = String, example = "EVENTCENTER")]
    pub service_type: ServiceType,
    /// Requested time slots of the service
    pub time_slot_ids: Vec<Uuid>,
    pub budget: Decimal,
    pub billing_address: String,
    pub accept_terms: bool,
    pub accept_cancellation_policy: bool,
    pub notes: Option<String>,
}

impl From<CreateQuoteRequest> for QuoteRequest {
    fn from(request: CreateQuoteRequest) -> Self {
        Self {
            service_id: request.service_id,
            service_type: request.service_type,
            time_slot_ids: request.time_slot_ids,
            budget: request.budget,
            billing_address: request.billing_address,
            accept_terms: request.accept_terms,
            accept_cancellation_policy: request.accept_cancellation_policy,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
    Approve,
    Reject,
}

/// A provider's decision on a pending quote
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteRequest {
    pub decision: DecisionKind,
    /// Taken off the subtotal on approval
    pub discount: Option<Decimal>,
    /// Shown to the customer on rejection
    pub reason: Option<String>,
}

impl From<UpdateQuoteRequest> for QuoteDecision {
    fn from(request: UpdateQuoteRequest) -> Self {
        match request.decision {
            DecisionKind::Approve => Self::Approve {
                discount: request.discount,
            },
            DecisionKind::Reject => Self::Reject {
                reason: request.reason,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    #[schema(value_type = String, example = "CATERING")]
    pub service_type: ServiceType,
    pub budget: Decimal,
    #[schema(value_type = String, example = "PENDING")]
    pub status: QuoteStatus,
    pub billing_address: String,
    pub accept_terms: bool,
    pub accept_cancellation_policy: bool,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<quote::Model> for QuoteResponse {
    fn from(quote: quote::Model) -> Self {
        Self {
            id: quote.id,
            customer_id: quote.customer_id,
            service_id: quote.service_id,
            service_type: quote.service_type,
            budget: quote.budget,
            status: quote.status,
            billing_address: quote.billing_address,
            accept_terms: quote.accept_terms,
            accept_cancellation_policy: quote.accept_cancellation_policy,
            notes: quote.notes,
            rejection_reason: quote.rejection_reason,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetailResponse {
    #[serde(flatten)]
    pub quote: QuoteResponse,
    pub requested_time_slots: Vec<TimeSlotResponse>,
    /// Present once the quote has been approved
    pub booking: Option<BookingResponse>,
}

impl From<QuoteDetail> for QuoteDetailResponse {
    fn from(detail: QuoteDetail) -> Self {
        Self {
            quote: detail.quote.into(),
            requested_time_slots: detail.time_slots.into_iter().map(Into::into).collect(),
            booking: detail.booking.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuoteQueryParams {
    #[param(value_type = Option<String>)]
    pub status: Option<QuoteStatus>,
    #[param(value_type = Option<String>)]
    pub service_type: Option<ServiceType>,
    pub service_id: Option<Uuid>,
    /// Matched against billing address and notes
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl QuoteQueryParams {
    pub fn into_parts(self) -> Result<(QuoteFilter, PageRequest), ApiError> {
        let request = page_request(self.page, self.per_page)?;
        let filter = QuoteFilter {
            status: self.status,
            service_type: self.service_type,
            service_id: self.service_id,
            search: self.search,
        };
        Ok((filter, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_uses_wire_names() {
        let request: CreateQuoteRequest = serde_json::from_value(serde_json::json!({
            "serviceId": "00000000-0000-0000-0000-000000000001",
            "serviceType": "EVENTCENTER",
            "timeSlotIds": ["00000000-0000-0000-0000-000000000002"],
            "budget": "750000",
            "billingAddress": "3 Admiralty Way, Lekki",
            "acceptTerms": true,
            "acceptCancellationPolicy": true
        }))
        .unwrap();

        let request = QuoteRequest::from(request);
        assert_eq!(request.service_type, ServiceType::EventCenter);
        assert_eq!(request.budget, dec!(750000));
        assert_eq!(request.notes, None);
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_decisions() {
        let approve: UpdateQuoteRequest =
            serde_json::from_str(r#"{"decision":"APPROVE","discount":"5000","reason":"ignored"}"#)
                .unwrap();
        assert_eq!(
            QuoteDecision::from(approve),
            QuoteDecision::Approve {
                discount: Some(dec!(5000))
            }
        );

        let reject: UpdateQuoteRequest =
            serde_json::from_str(r#"{"decision":"REJECT","reason":"Fully booked"}"#).unwrap();
        assert_eq!(
            QuoteDecision::from(reject),
            QuoteDecision::Reject {
                reason: Some("Fully booked".to_string())
            }
        );
    }
}
