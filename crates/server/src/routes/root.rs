use axum::http::StatusCode;

/// Landing endpoint pointing at the API docs
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Banquet marketplace API, see /docs")
}
