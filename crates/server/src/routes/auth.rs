use crate::{
    dtos::user::{RegisterRequest, UserResponse},
    error::{ApiError, ErrorBody},
    extract::{CurrentUser, Subject},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::UserService;

/// Returns the account behind the bearer token
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid JWT", body = ErrorBody),
        (status = 403, description = "No account registered for this token", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Registers the token's subject as a customer
#[utoipa::path(
    post,
    path = "/me",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid name or email", body = ErrorBody),
        (status = 401, description = "Missing or invalid JWT", body = ErrorBody),
        (status = 409, description = "Already registered", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = UserService::register(&state.db, &subject, body.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
