use models::{
    lifecycle::TransitionError,
    listing::ListingError,
    money::MoneyError,
    payment::PaymentError,
    policy::AccessDenied,
    quote::QuoteRequestError,
    time_slot::TimeSlotError,
    venue::VenueError,
};
use sea_orm::DbErr;
use uuid::Uuid;

/// Errors returned by the database services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

macro_rules! validation_from {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for ServiceError {
                fn from(err: $err) -> Self {
                    Self::Validation(err.to_string())
                }
            }
        )*
    };
}

validation_from!(ListingError, MoneyError, QuoteRequestError, VenueError);

impl From<TimeSlotError> for ServiceError {
    fn from(err: TimeSlotError) -> Self {
        match err {
            TimeSlotError::Overlap { .. } => Self::Conflict(err.to_string()),
            TimeSlotError::EmptyWindow { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<PaymentError> for ServiceError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Money(err) => err.into(),
            PaymentError::DepositUnavailable | PaymentError::FullPaymentUnavailable => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
