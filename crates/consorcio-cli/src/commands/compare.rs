use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use consorcio_core::simulation::{simulate, SimulationInput};
use consorcio_core::validation::{ConsortiumForm, FinancingForm};
use consorcio_core::AssetType;

use crate::input;

/// Arguments for the side-by-side comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset type: car or property
    #[arg(long, default_value = "car")]
    pub asset_type: AssetType,

    /// Price of the asset (used by both modalities)
    #[arg(long, allow_hyphen_values = true)]
    pub asset_value: Option<Decimal>,

    /// Number of monthly instalments (used by both modalities)
    #[arg(long, allow_hyphen_values = true)]
    pub term_months: Option<i64>,

    /// Consórcio lump-sum bid (lance)
    #[arg(long, allow_hyphen_values = true)]
    pub bid_amount: Option<Decimal>,

    /// Consórcio administrative fee in percent
    #[arg(long, allow_hyphen_values = true)]
    pub admin_fee: Option<Decimal>,

    /// Financing down payment (entrada)
    #[arg(long, allow_hyphen_values = true)]
    pub down_payment: Option<Decimal>,

    /// Financing effective annual rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub annual_rate: Option<Decimal>,

    /// Consórcio term when it differs from --term-months
    #[arg(long, allow_hyphen_values = true)]
    pub consortium_term_months: Option<i64>,
}

impl CompareArgs {
    fn into_simulation(self) -> SimulationInput {
        SimulationInput {
            asset_type: self.asset_type,
            consortium: ConsortiumForm {
                asset_value: self.asset_value,
                bid_amount: self.bid_amount,
                term_months: self.consortium_term_months.or(self.term_months),
                administrative_fee_percent: self.admin_fee,
            },
            financing: FinancingForm {
                asset_value: self.asset_value,
                down_payment: self.down_payment,
                term_months: self.term_months,
                annual_rate_percent: self.annual_rate,
            },
        }
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let simulation = match input::read_request::<SimulationInput>(args.input.as_deref())? {
        Some(simulation) => simulation,
        None => args.into_simulation(),
    };
    debug!(asset_type = %simulation.asset_type, "comparing modalities");

    let output = simulate(&simulation)?;
    debug!(
        savings = %output.result.comparison.savings_amount,
        consortium_is_better = output.result.comparison.consortium_is_better,
        "comparison finished"
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> CompareArgs {
        CompareArgs {
            input: None,
            asset_type: AssetType::Car,
            asset_value: Some(dec!(50000)),
            term_months: Some(60),
            bid_amount: Some(dec!(5000)),
            admin_fee: Some(dec!(15)),
            down_payment: Some(dec!(5000)),
            annual_rate: Some(dec!(12)),
            consortium_term_months: None,
        }
    }

    #[test]
    fn test_shared_flags_feed_both_forms() {
        let sim = args().into_simulation();
        assert_eq!(sim.consortium.asset_value, sim.financing.asset_value);
        assert_eq!(sim.consortium.term_months, Some(60));
        assert_eq!(sim.financing.term_months, Some(60));
    }

    #[test]
    fn test_consortium_term_override() {
        let sim = CompareArgs {
            consortium_term_months: Some(48),
            ..args()
        }
        .into_simulation();
        assert_eq!(sim.consortium.term_months, Some(48));
        assert_eq!(sim.financing.term_months, Some(60));
    }

    #[test]
    fn test_simulation_value_shape() {
        let output = simulate(&args().into_simulation()).unwrap();
        let value = serde_json::to_value(output).unwrap();
        assert_eq!(value["result"]["comparison"]["consortium_is_better"], true);
        let with_fee: Decimal = value["result"]["consortium"]["asset_value_with_fee"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(with_fee, dec!(57500));
    }
}
