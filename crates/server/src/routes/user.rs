use crate::{
    dtos::{
        pagination::Paginated,
        user::{UpdateUserRequest, UserQueryParams, UserResponse},
    },
    error::{ApiError, ErrorBody},
    extract::CurrentUser,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::user::UserService;
use uuid::Uuid;

/// Gets a user profile (the caller's own, or any for platform admins)
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Not allowed to view this user", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let found = UserService::get(&state.db, &user.actor(), id).await?;
    Ok(Json(found.into()))
}

/// Changes a user's role or activation (platform admins)
#[utoipa::path(
    patch,
    path = "/user/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Platform administrators only", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Administrators cannot demote themselves", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = UserService::update(&state.db, &user.actor(), id, body.into()).await?;
    Ok(Json(updated.into()))
}

/// Lists users (platform admins)
#[utoipa::path(
    get,
    path = "/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Page of users", body = Paginated<UserResponse>),
        (status = 403, description = "Platform administrators only", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<UserQueryParams>,
) -> Result<Json<Paginated<UserResponse>>, ApiError> {
    let (filter, request) = params.into_parts()?;
    let page = UserService::list(&state.db, &user.actor(), filter, request).await?;
    Ok(Json(page.into()))
}
