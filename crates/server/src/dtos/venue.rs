use super::pagination::page_request;
use crate::error::ApiError;
use chrono::NaiveDateTime;
use database::{
    entities::{catering, event_center},
    services::venue::{NewCatering, NewEventCenter, VenueFilter},
};
use models::listing::PageRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Reads a JSON array of strings, skipping anything else
fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCenterResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub pricing_per_slot: Decimal,
    pub deposit_percentage: Decimal,
    pub amenities: Vec<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<event_center::Model> for EventCenterResponse {
    fn from(center: event_center::Model) -> Self {
        Self {
            amenities: string_list(&center.amenities),
            id: center.id,
            owner_id: center.owner_id,
            name: center.name,
            description: center.description,
            address: center.address,
            capacity_min: center.capacity_min,
            capacity_max: center.capacity_max,
            pricing_per_slot: center.pricing_per_slot,
            deposit_percentage: center.deposit_percentage,
            is_active: center.is_active,
            created_at: center.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CateringResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisines: Vec<String>,
    pub start_price: Decimal,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub deposit_percentage: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<catering::Model> for CateringResponse {
    fn from(catering: catering::Model) -> Self {
        Self {
            cuisines: string_list(&catering.cuisines),
            id: catering.id,
            owner_id: catering.owner_id,
            name: catering.name,
            description: catering.description,
            start_price: catering.start_price,
            capacity_min: catering.capacity_min,
            capacity_max: catering.capacity_max,
            deposit_percentage: catering.deposit_percentage,
            is_active: catering.is_active,
            created_at: catering.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventCenterRequest {
    /// Provider admin who will manage the center
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub pricing_per_slot: Decimal,
    pub deposit_percentage: Decimal,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl From<CreateEventCenterRequest> for NewEventCenter {
    fn from(request: CreateEventCenterRequest) -> Self {
        Self {
            owner_id: request.owner_id,
            name: request.name,
            description: request.description,
            address: request.address,
            capacity_min: request.capacity_min,
            capacity_max: request.capacity_max,
            pricing_per_slot: request.pricing_per_slot,
            deposit_percentage: request.deposit_percentage,
            amenities: request.amenities,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCateringRequest {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    pub start_price: Decimal,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub deposit_percentage: Decimal,
}

impl From<CreateCateringRequest> for NewCatering {
    fn from(request: CreateCateringRequest) -> Self {
        Self {
            owner_id: request.owner_id,
            name: request.name,
            description: request.description,
            cuisines: request.cuisines,
            start_price: request.start_price,
            capacity_min: request.capacity_min,
            capacity_max: request.capacity_max,
            deposit_percentage: request.deposit_percentage,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VenueQueryParams {
    /// Case-insensitive match on name (and address for event centers)
    pub search: Option<String>,
    pub active: Option<bool>,
    pub owner_id: Option<Uuid>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl VenueQueryParams {
    pub fn into_parts(self) -> Result<(VenueFilter, PageRequest), ApiError> {
        let request = page_request(self.page, self.per_page)?;
        let filter = VenueFilter {
            search: self.search,
            is_active: self.active,
            owner_id: self.owner_id,
        };
        Ok((filter, request))
    }
}
