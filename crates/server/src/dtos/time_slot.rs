use super::pagination::page_request;
use crate::error::ApiError;
use chrono::{NaiveDate, NaiveDateTime};
use database::{entities::time_slot, services::time_slot::NewTimeSlot};
use models::{
    listing::{ListFilter, PageRequest, Searchable},
    venue::ServiceType,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    #[schema(value_type = String, example = "EVENTCENTER")]
    pub service_type: ServiceType,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_available: bool,
}

impl From<time_slot::Model> for TimeSlotResponse {
    fn from(slot: time_slot::Model) -> Self {
        Self {
            id: slot.id,
            service_id: slot.service_id,
            service_type: slot.service_type,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
        }
    }
}

// Slots carry no free text, so only the field filters apply
impl Searchable for TimeSlotResponse {
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    pub service_id: Uuid,
    #[schema(value_type = String, example = "EVENTCENTER")]
    pub service_type: ServiceType,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl From<CreateTimeSlotRequest> for NewTimeSlot {
    fn from(request: CreateTimeSlotRequest) -> Self {
        Self {
            service_id: request.service_id,
            service_type: request.service_type,
            start_time: request.start_time,
            end_time: request.end_time,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TimeSlotQueryParams {
    /// Event center or catering whose slots to list
    pub service_id: Uuid,
    pub available: Option<bool>,
    /// Only slots starting on this date
    pub date: Option<NaiveDate>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl TimeSlotQueryParams {
    pub fn filter(&self) -> ListFilter<TimeSlotResponse> {
        ListFilter::new()
            .field_eq(self.available, |slot: &TimeSlotResponse| slot.is_available)
            .field_eq(self.date, |slot: &TimeSlotResponse| slot.start_time.date())
    }

    pub fn page(&self) -> Result<PageRequest, ApiError> {
        page_request(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: u32, is_available: bool) -> TimeSlotResponse {
        let start = NaiveDate::from_ymd_opt(2025, 10, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TimeSlotResponse {
            id: Uuid::new_v4(),
            service_id: Uuid::nil(),
            service_type: ServiceType::Catering,
            start_time: start,
            end_time: start + chrono::Duration::hours(4),
            is_available,
        }
    }

    fn params(available: Option<bool>, date: Option<NaiveDate>) -> TimeSlotQueryParams {
        TimeSlotQueryParams {
            service_id: Uuid::nil(),
            available,
            date,
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn test_filter_by_availability_and_date() {
        let slots = vec![slot(1, true), slot(1, false), slot(2, true)];

        let available = params(Some(true), None).filter().apply(slots.clone());
        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|slot| slot.is_available));

        let first_day = params(None, NaiveDate::from_ymd_opt(2025, 10, 1))
            .filter()
            .apply(slots.clone());
        assert_eq!(first_day.len(), 2);

        // Cleared filters keep everything
        assert_eq!(params(None, None).filter().apply(slots).len(), 3);
    }

    #[test]
    fn test_query_string() {
        let params: TimeSlotQueryParams = serde_json::from_value(serde_json::json!({
            "serviceId": "00000000-0000-0000-0000-000000000000",
            "available": true,
            "perPage": 5
        }))
        .unwrap();
        assert_eq!(params.available, Some(true));
        assert_eq!(params.page().unwrap().per_page(), 5);
    }
}
