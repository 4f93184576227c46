use crate::{
    dtos::{
        pagination::Paginated,
        venue::{
            CateringResponse, CreateCateringRequest, CreateEventCenterRequest,
            EventCenterResponse, VenueQueryParams,
        },
    },
    error::{ApiError, ErrorBody},
    extract::CurrentUser,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::venue::VenueService;
use uuid::Uuid;

/// Lists event centers
#[utoipa::path(
    get,
    path = "/eventCenter",
    params(VenueQueryParams),
    responses(
        (status = 200, description = "Page of event centers", body = Paginated<EventCenterResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn list_event_centers(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<VenueQueryParams>,
) -> Result<Json<Paginated<EventCenterResponse>>, ApiError> {
    let (filter, request) = params.into_parts()?;
    let page = VenueService::list_event_centers(&state.db, filter, request).await?;
    Ok(Json(page.into()))
}

/// Gets an event center
#[utoipa::path(
    get,
    path = "/eventCenter/{id}",
    params(
        ("id" = Uuid, Path, description = "Event center ID")
    ),
    responses(
        (status = 200, description = "Event center found", body = EventCenterResponse),
        (status = 404, description = "Event center not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn get_event_center(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EventCenterResponse>, ApiError> {
    let center = VenueService::get_event_center(&state.db, id).await?;
    Ok(Json(center.into()))
}

/// Creates an event center (platform admins)
#[utoipa::path(
    post,
    path = "/eventCenter",
    request_body = CreateEventCenterRequest,
    responses(
        (status = 201, description = "Event center created", body = EventCenterResponse),
        (status = 400, description = "Invalid pricing or capacity", body = ErrorBody),
        (status = 403, description = "Platform administrators only", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn create_event_center(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateEventCenterRequest>,
) -> Result<(StatusCode, Json<EventCenterResponse>), ApiError> {
    let center = VenueService::create_event_center(&state.db, &user.actor(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(center.into())))
}

/// Lists caterings
#[utoipa::path(
    get,
    path = "/catering",
    params(VenueQueryParams),
    responses(
        (status = 200, description = "Page of caterings", body = Paginated<CateringResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn list_caterings(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<VenueQueryParams>,
) -> Result<Json<Paginated<CateringResponse>>, ApiError> {
    let (filter, request) = params.into_parts()?;
    let page = VenueService::list_caterings(&state.db, filter, request).await?;
    Ok(Json(page.into()))
}

/// Gets a catering
#[utoipa::path(
    get,
    path = "/catering/{id}",
    params(
        ("id" = Uuid, Path, description = "Catering ID")
    ),
    responses(
        (status = 200, description = "Catering found", body = CateringResponse),
        (status = 404, description = "Catering not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn get_catering(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CateringResponse>, ApiError> {
    let catering = VenueService::get_catering(&state.db, id).await?;
    Ok(Json(catering.into()))
}

/// Creates a catering (platform admins)
#[utoipa::path(
    post,
    path = "/catering",
    request_body = CreateCateringRequest,
    responses(
        (status = 201, description = "Catering created", body = CateringResponse),
        (status = 400, description = "Invalid pricing or capacity", body = ErrorBody),
        (status = 403, description = "Platform administrators only", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Services"
)]
pub async fn create_catering(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateCateringRequest>,
) -> Result<(StatusCode, Json<CateringResponse>), ApiError> {
    let catering = VenueService::create_catering(&state.db, &user.actor(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(catering.into())))
}
