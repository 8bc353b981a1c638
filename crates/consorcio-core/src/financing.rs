use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ConsorcioError;
use crate::time_value;
use crate::types::{AssetType, Money, Months, Percent, Rate};
use crate::ConsorcioResult;

/// Fully-specified financing (loan) parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingInput {
    /// Price of the car or property
    pub asset_value: Money,
    /// Down payment (entrada) paid up front
    #[serde(default)]
    pub down_payment: Money,
    /// Number of monthly instalments
    pub term_months: Months,
    /// Effective annual interest rate, in percentage points
    pub annual_rate_percent: Percent,
    #[serde(default)]
    pub asset_type: AssetType,
}

/// Projected cost of an amortised loan under the Price system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub asset_value: Money,
    pub down_payment: Money,
    pub term_months: Months,
    pub annual_rate_percent: Percent,
    /// Asset value minus down payment
    pub financed_amount: Money,
    /// Effective monthly rate (decimal, not percent)
    pub monthly_rate: Rate,
    /// Fixed instalment
    pub monthly_payment: Money,
    /// Instalments plus down payment
    pub total_cost: Money,
    /// Total cost minus asset value
    pub total_interest: Money,
    pub asset_type: AssetType,
}

/// Cost of financing the asset with fixed instalments (Sistema Price).
///
/// The annual rate is converted to its compound monthly equivalent,
/// (1 + r)^(1/12) - 1, and the instalment is the level annuity payment on the
/// financed amount. A zero rate falls back to financed amount / term.
///
/// Ranges are not checked here; run validation first.
pub fn compute_financing(input: &FinancingInput) -> ConsorcioResult<FinancingResult> {
    if input.term_months == 0 {
        return Err(ConsorcioError::DivisionByZero {
            context: "financing monthly payment (term_months = 0)".into(),
        });
    }

    let financed_amount = input
        .asset_value
        .checked_sub(input.down_payment)
        .ok_or_else(|| out_of_range("down_payment", "financed amount"))?;
    let monthly_rate = time_value::monthly_rate_from_annual(input.annual_rate_percent / dec!(100))
        .map_err(|_| ConsorcioError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!(
                "Annual rate must be greater than -100%, got {}%",
                input.annual_rate_percent
            ),
        })?;

    let term = Decimal::from(input.term_months);
    let monthly_payment = if monthly_rate.is_zero() {
        financed_amount / term
    } else {
        -time_value::pmt(monthly_rate, input.term_months, financed_amount, Decimal::ZERO)?
    };

    let total_cost = monthly_payment
        .checked_mul(term)
        .and_then(|instalments| instalments.checked_add(input.down_payment))
        .ok_or_else(|| out_of_range("asset_value", "total cost"))?;
    let total_interest = total_cost
        .checked_sub(input.asset_value)
        .ok_or_else(|| out_of_range("asset_value", "total interest"))?;

    Ok(FinancingResult {
        asset_value: input.asset_value,
        down_payment: input.down_payment,
        term_months: input.term_months,
        annual_rate_percent: input.annual_rate_percent,
        financed_amount,
        monthly_rate,
        monthly_payment,
        total_cost,
        total_interest,
        asset_type: input.asset_type,
    })
}

fn out_of_range(field: &str, quantity: &str) -> ConsorcioError {
    ConsorcioError::InvalidInput {
        field: field.into(),
        reason: format!("{quantity} exceeds the decimal range"),
    }
}
