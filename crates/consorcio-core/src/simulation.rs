use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::comparison::{compare, Comparison};
use crate::consortium::{compute_consortium, ConsortiumResult};
use crate::error::ConsorcioError;
use crate::financing::{compute_financing, FinancingResult};
use crate::types::{with_metadata, AssetType, ComputationOutput};
use crate::validation::{ConsortiumForm, FinancingForm};
use crate::ConsorcioResult;

/// Bids above this share of the asset value are flagged.
const LARGE_BID_SHARE: Decimal = dec!(0.5);

/// Both forms as submitted, plus the asset type they apply to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationInput {
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub consortium: ConsortiumForm,
    #[serde(default)]
    pub financing: FinancingForm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub asset_type: AssetType,
    pub consortium: ConsortiumResult,
    pub financing: FinancingResult,
    pub comparison: Comparison,
}

/// Validate both forms, price both modalities and compare them.
///
/// Nothing is computed while either form has errors; both error maps are
/// returned together in [`ConsorcioError::Validation`].
pub fn simulate(input: &SimulationInput) -> ConsorcioResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (consortium_input, financing_input) = match (
        input.consortium.clone().into_input(input.asset_type),
        input.financing.clone().into_input(input.asset_type),
    ) {
        (Ok(consortium), Ok(financing)) => (consortium, financing),
        (consortium, financing) => {
            return Err(ConsorcioError::Validation {
                consortium: consortium.err().unwrap_or_default(),
                financing: financing.err().unwrap_or_default(),
            })
        }
    };

    let consortium = compute_consortium(&consortium_input)?;
    let financing = compute_financing(&financing_input)?;
    let comparison = compare(&consortium, &financing);

    // --- Advisory warnings ---
    if consortium_input.asset_value != financing_input.asset_value {
        warnings.push(format!(
            "Asset values differ between modalities ({} vs {}); totals are not directly comparable",
            consortium_input.asset_value, financing_input.asset_value
        ));
    }
    if consortium_input.administrative_fee_percent.is_zero() {
        warnings.push("Administrative fee is 0%; real consórcio groups always charge one".into());
    }
    if financing_input.annual_rate_percent.is_zero() {
        warnings.push("Annual interest rate is 0%; financing cost equals the asset value".into());
    }
    if consortium_input.bid_amount > consortium_input.asset_value * LARGE_BID_SHARE {
        warnings.push(format!(
            "Bid of {} exceeds half the asset value; the instalment does not shrink with the bid",
            consortium_input.bid_amount
        ));
    }

    let output = SimulationOutput {
        asset_type: input.asset_type,
        consortium,
        financing,
        comparison,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Consórcio (flat instalments + administrative fee, bid as lump sum) vs. \
         Financiamento (Sistema Price, compound monthly rate)",
        &serde_json::json!({
            "asset_type": input.asset_type,
            "consortium_term_months": consortium_input.term_months,
            "financing_term_months": financing_input.term_months,
            "administrative_fee_percent": consortium_input.administrative_fee_percent.to_string(),
            "annual_rate_percent": financing_input.annual_rate_percent.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
