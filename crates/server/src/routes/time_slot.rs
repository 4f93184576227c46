use crate::{
    dtos::{
        pagination::Paginated,
        time_slot::{CreateTimeSlotRequest, TimeSlotQueryParams, TimeSlotResponse},
    },
    error::{ApiError, ErrorBody},
    extract::CurrentUser,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use database::services::time_slot::TimeSlotService;
use models::listing::paginate;

/// Lists the time slots of a service, optionally only available ones or those on one date
#[utoipa::path(
    get,
    path = "/timeSlots",
    params(TimeSlotQueryParams),
    responses(
        (status = 200, description = "Page of time slots", body = Paginated<TimeSlotResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Time Slots"
)]
pub async fn list_time_slots(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<TimeSlotQueryParams>,
) -> Result<Json<Paginated<TimeSlotResponse>>, ApiError> {
    let request = params.page()?;
    let slots: Vec<TimeSlotResponse> = TimeSlotService::list_for_service(&state.db, params.service_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let filtered = params.filter().apply(slots);
    Ok(Json(paginate(filtered, request).into()))
}

/// Adds a time slot to a service (its provider or a platform admin)
#[utoipa::path(
    post,
    path = "/timeSlots",
    request_body = CreateTimeSlotRequest,
    responses(
        (status = 201, description = "Time slot created", body = TimeSlotResponse),
        (status = 400, description = "End is not after start", body = ErrorBody),
        (status = 403, description = "Not a manager of this service", body = ErrorBody),
        (status = 404, description = "Service not found", body = ErrorBody),
        (status = 409, description = "Overlaps an existing slot", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Time Slots"
)]
pub async fn create_time_slot(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), ApiError> {
    let slot = TimeSlotService::create(&state.db, &user.actor(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(slot.into())))
}
