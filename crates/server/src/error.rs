use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::ServiceError;
use models::listing::ListingError;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Canonical reason of the status code
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("missing or invalid bearer token")]
    Unauthorized,
    #[error("no account is registered for this token, register with POST /me first")]
    NotRegistered,
    #[error("{0}")]
    BadRequest(String),
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::InvalidTransition(_) | ServiceError::Conflict(_) => {
                    StatusCode::CONFLICT
                }
                ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotRegistered => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Database details stay in the logs
        let message = if status.is_server_error() {
            log::error!("{self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
