use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ConsorcioError;
use crate::types::{AssetType, Money, Months, Percent};
use crate::ConsorcioResult;

/// Fully-specified consórcio parameters. Build it from a validated
/// [`ConsortiumForm`](crate::validation::ConsortiumForm) when the values come
/// from a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsortiumInput {
    /// Price of the car or property
    pub asset_value: Money,
    /// Lump-sum bid (lance) paid once, on top of the instalments
    #[serde(default)]
    pub bid_amount: Money,
    /// Number of monthly instalments
    pub term_months: Months,
    /// Administrative fee charged on the asset value, in percentage points
    pub administrative_fee_percent: Percent,
    #[serde(default)]
    pub asset_type: AssetType,
}

/// Projected cost of a consórcio plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsortiumResult {
    pub asset_value: Money,
    pub bid_amount: Money,
    pub term_months: Months,
    pub administrative_fee_percent: Percent,
    /// Asset value inflated by the administrative fee
    pub asset_value_with_fee: Money,
    /// Flat instalment: value with fee / term
    pub monthly_payment: Money,
    /// Instalments plus the bid
    pub total_cost: Money,
    pub asset_type: AssetType,
}

/// Cost of a consórcio plan. No interest accrues: the administrative fee is
/// applied once to the asset value and the result is split into equal
/// instalments. The bid is a lump sum added to the total and does not reduce
/// the instalment.
///
/// Ranges are not checked here; run validation first. A zero term is the only
/// input that cannot produce a number.
pub fn compute_consortium(input: &ConsortiumInput) -> ConsorcioResult<ConsortiumResult> {
    if input.term_months == 0 {
        return Err(ConsorcioError::DivisionByZero {
            context: "consortium monthly payment (term_months = 0)".into(),
        });
    }

    let term = Decimal::from(input.term_months);
    let asset_value_with_fee = (Decimal::ONE + input.administrative_fee_percent / dec!(100))
        .checked_mul(input.asset_value)
        .ok_or_else(|| overflow("asset_value", "asset value with fee"))?;
    let monthly_payment = asset_value_with_fee / term;
    let total_cost = monthly_payment
        .checked_mul(term)
        .and_then(|instalments| instalments.checked_add(input.bid_amount))
        .ok_or_else(|| overflow("bid_amount", "total cost"))?;

    Ok(ConsortiumResult {
        asset_value: input.asset_value,
        bid_amount: input.bid_amount,
        term_months: input.term_months,
        administrative_fee_percent: input.administrative_fee_percent,
        asset_value_with_fee,
        monthly_payment,
        total_cost,
        asset_type: input.asset_type,
    })
}

fn overflow(field: &str, quantity: &str) -> ConsorcioError {
    ConsorcioError::InvalidInput {
        field: field.into(),
        reason: format!("{quantity} exceeds the decimal range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> ConsortiumInput {
        ConsortiumInput {
            asset_value: dec!(50000),
            bid_amount: dec!(5000),
            term_months: 60,
            administrative_fee_percent: dec!(15),
            asset_type: AssetType::Car,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute_consortium(&sample_input()).unwrap();

        assert_eq!(result.asset_value_with_fee, dec!(57500));
        // 57500 / 60 = 958.333...
        assert!(
            (result.monthly_payment - dec!(958.3333333)).abs() < dec!(0.000001),
            "monthly payment: got {}",
            result.monthly_payment
        );
        assert!(
            (result.total_cost - dec!(62500)).abs() < dec!(0.000001),
            "total cost: got {}",
            result.total_cost
        );
    }

    #[test]
    fn test_bid_does_not_reduce_instalment() {
        let with_bid = compute_consortium(&sample_input()).unwrap();
        let without_bid = compute_consortium(&ConsortiumInput {
            bid_amount: Decimal::ZERO,
            ..sample_input()
        })
        .unwrap();

        assert_eq!(with_bid.monthly_payment, without_bid.monthly_payment);
        assert_eq!(with_bid.total_cost - without_bid.total_cost, dec!(5000));
    }

    #[test]
    fn test_zero_fee_is_plain_division() {
        let result = compute_consortium(&ConsortiumInput {
            asset_value: dec!(120000),
            bid_amount: Decimal::ZERO,
            term_months: 48,
            administrative_fee_percent: Decimal::ZERO,
            asset_type: AssetType::Car,
        })
        .unwrap();

        assert_eq!(result.asset_value_with_fee, dec!(120000));
        assert_eq!(result.monthly_payment, dec!(120000) / dec!(48));
        assert_eq!(result.monthly_payment, dec!(2500));
    }

    #[test]
    fn test_echoes_inputs() {
        let input = ConsortiumInput {
            asset_type: AssetType::Property,
            ..sample_input()
        };
        let result = compute_consortium(&input).unwrap();
        assert_eq!(result.asset_value, input.asset_value);
        assert_eq!(result.bid_amount, input.bid_amount);
        assert_eq!(result.term_months, input.term_months);
        assert_eq!(result.administrative_fee_percent, input.administrative_fee_percent);
        assert_eq!(result.asset_type, AssetType::Property);
    }

    #[test]
    fn test_zero_term_is_an_error() {
        let input = ConsortiumInput {
            term_months: 0,
            ..sample_input()
        };
        assert!(matches!(
            compute_consortium(&input),
            Err(ConsorcioError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_oversized_asset_value_is_an_error() {
        let input = ConsortiumInput {
            asset_value: dec!(70000000000000000000000000000),
            ..sample_input()
        };
        assert!(matches!(
            compute_consortium(&input),
            Err(ConsorcioError::InvalidInput { ref field, .. }) if field == "asset_value"
        ));
    }

    #[test]
    fn test_oversized_bid_is_an_error() {
        let input = ConsortiumInput {
            bid_amount: Decimal::MAX,
            ..sample_input()
        };
        assert!(compute_consortium(&input).is_err());
    }

    #[test]
    fn test_bid_defaults_to_zero_when_deserialising() {
        let input: ConsortiumInput = serde_json::from_str(
            r#"{"asset_value":"80000","term_months":60,"administrative_fee_percent":"12"}"#,
        )
        .unwrap();
        assert_eq!(input.bid_amount, Decimal::ZERO);
        assert_eq!(input.asset_type, AssetType::Car);
    }

    proptest! {
        #[test]
        fn prop_total_cost_is_instalments_plus_bid(
            value in 1_000i64..2_000_000,
            bid_share in 0i64..100,
            term in 12u32..=360,
            fee in 0i64..=100,
        ) {
            let asset_value = Decimal::from(value);
            let bid_amount = asset_value * Decimal::from(bid_share) / dec!(100);
            let result = compute_consortium(&ConsortiumInput {
                asset_value,
                bid_amount,
                term_months: term,
                administrative_fee_percent: Decimal::from(fee),
                asset_type: AssetType::Property,
            }).unwrap();

            let rebuilt = result.monthly_payment * Decimal::from(term) + bid_amount;
            prop_assert_eq!(result.total_cost, rebuilt);
            prop_assert!((result.total_cost - (result.asset_value_with_fee + bid_amount)).abs() < dec!(0.0000001));
        }

        #[test]
        fn prop_higher_fee_costs_more(
            value in 1_000i64..2_000_000,
            term in 12u32..=360,
            fee in 0i64..100,
            bump in 1i64..=20,
        ) {
            let base = ConsortiumInput {
                asset_value: Decimal::from(value),
                bid_amount: Decimal::ZERO,
                term_months: term,
                administrative_fee_percent: Decimal::from(fee),
                asset_type: AssetType::Property,
            };
            let higher = ConsortiumInput {
                administrative_fee_percent: Decimal::from(fee + bump),
                ..base.clone()
            };
            let low = compute_consortium(&base).unwrap();
            let high = compute_consortium(&higher).unwrap();
            prop_assert!(high.total_cost > low.total_cost);
        }
    }
}
