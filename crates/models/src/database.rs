use sea_orm::Value;

/// Stores a strum-backed enum as its text representation
macro_rules! text_column {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sea_orm::sea_query::ValueType for $ty {
                fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                    match v {
                        Value::String(Some(s)) => {
                            s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr)
                        }
                        _ => Err(sea_orm::sea_query::ValueTypeErr),
                    }
                }

                fn type_name() -> String {
                    stringify!($ty).to_string()
                }

                fn array_type() -> sea_orm::sea_query::ArrayType {
                    sea_orm::sea_query::ArrayType::String
                }

                fn column_type() -> sea_orm::sea_query::ColumnType {
                    sea_orm::sea_query::ColumnType::Text
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::String(Some(Box::new(value.to_string())))
                }
            }

            impl sea_orm::TryGetable for $ty {
                fn try_get_by<I: sea_orm::ColIdx>(
                    res: &sea_orm::QueryResult,
                    index: I,
                ) -> Result<Self, sea_orm::TryGetError> {
                    let val: String = res.try_get_by(index)?;

                    val.parse().map_err(|e| {
                        sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                            "Failed to parse {}: {e}",
                            stringify!($ty)
                        )))
                    })
                }
            }

            impl sea_orm::sea_query::Nullable for $ty {
                fn null() -> Value {
                    Value::String(None)
                }
            }
        )*
    };
}

text_column!(
    crate::booking::BookingStatus,
    crate::invoice::InvoiceStatus,
    crate::payment::PaymentKind,
    crate::payment::PaymentStatus,
    crate::policy::UserRole,
    crate::quote::QuoteStatus,
    crate::venue::ServiceType,
);

#[cfg(test)]
mod tests {
    use crate::{quote::QuoteStatus, venue::ServiceType};
    use sea_orm::{Value, sea_query::ValueType};

    #[test]
    fn test_enum_stored_as_wire_text() {
        let value: Value = ServiceType::EventCenter.into();
        assert_eq!(value, Value::String(Some(Box::new("EVENTCENTER".to_string()))));

        let parsed = <QuoteStatus as ValueType>::try_from(Value::String(Some(Box::new(
            "APPROVED".to_string(),
        ))))
        .unwrap();
        assert_eq!(parsed, QuoteStatus::Approved);
    }

    #[test]
    fn test_unknown_text_is_rejected() {
        let parsed = <QuoteStatus as ValueType>::try_from(Value::String(Some(Box::new(
            "MAYBE".to_string(),
        ))));
        assert!(parsed.is_err());
    }
}
