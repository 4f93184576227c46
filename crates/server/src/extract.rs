use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use database::{entities::user, services::user::UserService};
use models::policy::Actor;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The `sub` claim of the verified bearer token
#[derive(Debug, Clone)]
pub struct Subject(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Subject {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .map(Self)
            .ok_or(ApiError::Unauthorized)
    }
}

/// The registered user behind the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Subject(subject) = Subject::from_request_parts(parts, state).await?;

        match UserService::find_by_subject(&state.db, &subject).await? {
            Some(user) => Ok(Self(user)),
            None => {
                log::warn!("Token subject {subject} has no registered account");
                Err(ApiError::NotRegistered)
            }
        }
    }
}
