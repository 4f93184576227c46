use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Smallest amount a customer may pay in one transaction
pub const MINIMUM_PAYMENT: Decimal = Decimal::ONE_HUNDRED;

/// Errors from monetary arithmetic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(Decimal),
    #[error("discount {discount} exceeds subtotal {sub_total}")]
    DiscountExceedsSubtotal { discount: Decimal, sub_total: Decimal },
}

/// Rounds to two decimal places, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn ensure_non_negative(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(MoneyError::NegativeAmount(amount))
    } else {
        Ok(amount)
    }
}

pub fn ensure_percentage(percentage: Decimal) -> Result<Decimal, MoneyError> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        Err(MoneyError::PercentageOutOfRange(percentage))
    } else {
        Ok(percentage)
    }
}

/// `total * percentage / 100`, rounded to cents
pub fn deposit_amount(total: Decimal, percentage: Decimal) -> Result<Decimal, MoneyError> {
    let total = ensure_non_negative(total)?;
    let percentage = ensure_percentage(percentage)?;

    Ok(round_money(total * percentage / Decimal::ONE_HUNDRED))
}

/// Subtotal, discount and total of a booking. Tax is included in the prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub sub_total: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl Financials {
    /// Prices `slot_count` slots at `unit_price` each, less `discount`
    pub fn compute(
        unit_price: Decimal,
        slot_count: usize,
        discount: Decimal,
    ) -> Result<Self, MoneyError> {
        let unit_price = ensure_non_negative(unit_price)?;
        let discount = round_money(ensure_non_negative(discount)?);

        let sub_total = round_money(unit_price * Decimal::from(slot_count));
        if discount > sub_total {
            return Err(MoneyError::DiscountExceedsSubtotal { discount, sub_total });
        }

        Ok(Self {
            sub_total,
            discount,
            total: sub_total - discount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_example() {
        let total = dec!(1000);
        let deposit = deposit_amount(total, dec!(20)).unwrap();
        assert_eq!(deposit, dec!(200));
        assert_eq!(total - deposit, dec!(800));
    }

    #[test]
    fn test_deposit_rounds_to_cents() {
        assert_eq!(deposit_amount(dec!(333.33), dec!(15)).unwrap(), dec!(50.00));
        assert_eq!(deposit_amount(dec!(10.05), dec!(50)).unwrap(), dec!(5.03));
    }

    #[test]
    fn test_deposit_rejects_bad_input() {
        assert_eq!(
            deposit_amount(dec!(-1), dec!(20)),
            Err(MoneyError::NegativeAmount(dec!(-1)))
        );
        assert_eq!(
            deposit_amount(dec!(100), dec!(101)),
            Err(MoneyError::PercentageOutOfRange(dec!(101)))
        );
        assert_eq!(
            deposit_amount(dec!(100), dec!(-5)),
            Err(MoneyError::PercentageOutOfRange(dec!(-5)))
        );
    }

    #[test]
    fn test_financials_compute() {
        let financials = Financials::compute(dec!(250000), 3, dec!(50000)).unwrap();
        assert_eq!(financials.sub_total, dec!(750000));
        assert_eq!(financials.discount, dec!(50000));
        assert_eq!(financials.total, dec!(700000));
    }

    #[test]
    fn test_financials_discount_cannot_exceed_subtotal() {
        let err = Financials::compute(dec!(100), 1, dec!(150)).unwrap_err();
        assert_eq!(
            err,
            MoneyError::DiscountExceedsSubtotal {
                discount: dec!(150),
                sub_total: dec!(100)
            }
        );
    }

    proptest! {
        #[test]
        fn prop_deposit_bounded_by_total(cents in 0i64..1_000_000_000, pct in 0u32..=100) {
            let total = Decimal::new(cents, 2);
            let percentage = Decimal::from(pct);
            let deposit = deposit_amount(total, percentage).unwrap();

            prop_assert!(deposit >= Decimal::ZERO);
            prop_assert!(deposit <= total);
            prop_assert_eq!(deposit, round_money(total * percentage / Decimal::ONE_HUNDRED));
        }

        #[test]
        fn prop_whole_percentages_of_whole_totals_are_exact(units in 0i64..10_000_000, pct in 0u32..=100) {
            let total = Decimal::from(units) * Decimal::ONE_HUNDRED;
            let deposit = deposit_amount(total, Decimal::from(pct)).unwrap();
            prop_assert_eq!(deposit, Decimal::from(units) * Decimal::from(pct));
        }
    }
}
