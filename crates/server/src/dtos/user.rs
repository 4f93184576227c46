use super::pagination::page_request;
use crate::error::ApiError;
use chrono::NaiveDateTime;
use database::{
    entities::user,
    services::user::{NewUser, UserFilter, UserUpdate},
};
use models::{listing::PageRequest, policy::UserRole};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "CUSTOMER")]
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[schema(value_type = Option<String>, example = "PROVIDER_ADMIN")]
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            role: request.role,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQueryParams {
    #[param(value_type = Option<String>)]
    pub role: Option<UserRole>,
    pub active: Option<bool>,
    /// Matched against name and email
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl UserQueryParams {
    pub fn into_parts(self) -> Result<(UserFilter, PageRequest), ApiError> {
        let request = page_request(self.page, self.per_page)?;
        let filter = UserFilter {
            role: self.role,
            is_active: self.active,
            search: self.search,
        };
        Ok((filter, request))
    }
}
