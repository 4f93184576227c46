use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Browses services and requests quotes
    Customer,
    /// Runs one or more event centers or caterings
    ProviderAdmin,
    /// Operates the marketplace
    PlatformAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("access denied: {0}")]
pub struct AccessDenied(pub &'static str);

/// The authenticated user an operation runs on behalf of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
    pub is_active: bool,
}

impl Actor {
    pub fn is_platform_admin(&self) -> bool {
        self.is_active && self.role == UserRole::PlatformAdmin
    }

    pub fn ensure_active(&self) -> Result<(), AccessDenied> {
        if self.is_active {
            Ok(())
        } else {
            Err(AccessDenied("account is deactivated"))
        }
    }

    pub fn ensure_platform_admin(&self) -> Result<(), AccessDenied> {
        self.ensure_active()?;
        if self.role == UserRole::PlatformAdmin {
            Ok(())
        } else {
            Err(AccessDenied("platform administrators only"))
        }
    }

    /// Only customers request quotes, so a booking always has a customer
    pub fn ensure_can_request_quote(&self) -> Result<(), AccessDenied> {
        self.ensure_active()?;
        if self.role == UserRole::Customer {
            Ok(())
        } else {
            Err(AccessDenied("only customers can request quotes"))
        }
    }

    /// Owners of a service and platform admins manage its quotes, bookings and slots
    pub fn can_manage_service(&self, owner_id: Uuid) -> bool {
        if !self.is_active {
            return false;
        }

        match self.role {
            UserRole::PlatformAdmin => true,
            UserRole::ProviderAdmin => self.user_id == owner_id,
            UserRole::Customer => false,
        }
    }

    pub fn ensure_can_manage_service(&self, owner_id: Uuid) -> Result<(), AccessDenied> {
        if self.can_manage_service(owner_id) {
            Ok(())
        } else {
            Err(AccessDenied("not a manager of this service"))
        }
    }

    /// A customer sees their own records; managers see records of their services
    pub fn can_view_record(&self, customer_id: Uuid, service_owner_id: Uuid) -> bool {
        (self.is_active && self.user_id == customer_id) || self.can_manage_service(service_owner_id)
    }

    pub fn ensure_can_view_record(
        &self,
        customer_id: Uuid,
        service_owner_id: Uuid,
    ) -> Result<(), AccessDenied> {
        if self.can_view_record(customer_id, service_owner_id) {
            Ok(())
        } else {
            Err(AccessDenied("not a party to this record"))
        }
    }

    /// Users may read their own profile; platform admins may read any
    pub fn can_view_user(&self, user_id: Uuid) -> bool {
        (self.is_active && self.user_id == user_id) || self.is_platform_admin()
    }
}
