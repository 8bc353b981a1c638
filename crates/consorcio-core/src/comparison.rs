use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::consortium::ConsortiumResult;
use crate::financing::FinancingResult;
use crate::types::{Money, Percent};

/// Head-to-head comparison of the two modalities. Positive amounts favour
/// the consórcio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Financing total cost minus consórcio total cost
    pub savings_amount: Money,
    /// Savings as a share of the financing total cost
    pub savings_percent: Percent,
    /// Financing instalment minus consórcio instalment
    pub payment_difference: Money,
    /// Instalment difference as a share of the financing instalment
    pub payment_difference_percent: Percent,
    /// Strictly cheaper in total; a tie favours financing
    pub consortium_is_better: bool,
}

/// Compare two already-computed results. Total: percentages over a zero
/// denominator are reported as zero.
pub fn compare(consortium: &ConsortiumResult, financing: &FinancingResult) -> Comparison {
    let savings_amount = financing.total_cost - consortium.total_cost;
    let payment_difference = financing.monthly_payment - consortium.monthly_payment;

    Comparison {
        savings_amount,
        savings_percent: percent_of(savings_amount, financing.total_cost),
        payment_difference,
        payment_difference_percent: percent_of(payment_difference, financing.monthly_payment),
        consortium_is_better: savings_amount > Decimal::ZERO,
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Percent {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * dec!(100)
    }
}
