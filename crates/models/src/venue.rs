use crate::money::{MoneyError, ensure_non_negative, ensure_percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kind of service a customer can request a quote for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ServiceType {
    /// A venue rented by the time slot
    #[serde(rename = "EVENTCENTER")]
    #[strum(serialize = "EVENTCENTER")]
    EventCenter,
    /// A catering provider
    #[serde(rename = "CATERING")]
    #[strum(serialize = "CATERING")]
    Catering,
}

/// Errors from validating a service's commercial terms
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VenueError {
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error("capacity range {min}-{max} is invalid")]
    InvalidCapacity { min: i32, max: i32 },
    #[error("name must not be blank")]
    BlankName,
}

/// The commercial terms shared by event centers and caterings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueTerms {
    pub service_type: ServiceType,
    /// `pricing_per_slot` for event centers, `start_price` for caterings
    pub unit_price: Decimal,
    pub deposit_percentage: Decimal,
    pub capacity_min: i32,
    pub capacity_max: i32,
}

impl VenueTerms {
    pub fn validate(&self) -> Result<(), VenueError> {
        ensure_non_negative(self.unit_price)?;
        ensure_percentage(self.deposit_percentage)?;

        if self.capacity_min < 0 || self.capacity_min > self.capacity_max {
            return Err(VenueError::InvalidCapacity {
                min: self.capacity_min,
                max: self.capacity_max,
            });
        }

        Ok(())
    }
}

/// Validates a display name
pub fn validate_name(name: &str) -> Result<(), VenueError> {
    if name.trim().is_empty() {
        Err(VenueError::BlankName)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn terms() -> VenueTerms {
        VenueTerms {
            service_type: ServiceType::EventCenter,
            unit_price: dec!(150000),
            deposit_percentage: dec!(30),
            capacity_min: 50,
            capacity_max: 500,
        }
    }

    #[test]
    fn test_service_type_wire_values() {
        assert_eq!(ServiceType::EventCenter.to_string(), "EVENTCENTER");
        assert_eq!(
            serde_json::to_string(&ServiceType::Catering).unwrap(),
            "\"CATERING\""
        );
        for service_type in ServiceType::iter() {
            let parsed = ServiceType::from_str(&service_type.to_string()).unwrap();
            assert_eq!(parsed, service_type);
        }
    }

    #[test]
    fn test_terms_validate() {
        assert!(terms().validate().is_ok());

        let mut bad = terms();
        bad.deposit_percentage = dec!(120);
        assert!(matches!(bad.validate(), Err(VenueError::Money(_))));

        let mut bad = terms();
        bad.capacity_min = 600;
        assert_eq!(
            bad.validate(),
            Err(VenueError::InvalidCapacity { min: 600, max: 500 })
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Grand Hall").is_ok());
        assert_eq!(validate_name("   "), Err(VenueError::BlankName));
    }
}
