use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use consorcio_core::financing::compute_financing;
use consorcio_core::validation::FinancingForm;
use consorcio_core::{with_metadata, AssetType, ConsorcioError};

use crate::input;

/// Arguments for a financing projection
#[derive(Args)]
pub struct FinancingArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset type: car or property
    #[arg(long, default_value = "car")]
    pub asset_type: AssetType,

    /// Price of the asset
    #[arg(long, allow_hyphen_values = true)]
    pub asset_value: Option<Decimal>,

    /// Down payment (entrada)
    #[arg(long, allow_hyphen_values = true)]
    pub down_payment: Option<Decimal>,

    /// Number of monthly instalments
    #[arg(long, allow_hyphen_values = true)]
    pub term_months: Option<i64>,

    /// Effective annual interest rate in percent (e.g. 12 for 12% a.a.)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_rate: Option<Decimal>,
}

/// JSON shape accepted by `--input` and stdin
#[derive(Debug, Deserialize)]
pub struct FinancingRequest {
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(flatten)]
    pub form: FinancingForm,
}

impl FinancingArgs {
    fn into_request(self) -> FinancingRequest {
        FinancingRequest {
            asset_type: self.asset_type,
            form: FinancingForm {
                asset_value: self.asset_value,
                down_payment: self.down_payment,
                term_months: self.term_months,
                annual_rate_percent: self.annual_rate,
            },
        }
    }
}

pub fn run_financing(args: FinancingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let request = match input::read_request::<FinancingRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => args.into_request(),
    };
    debug!(asset_type = %request.asset_type, "pricing financiamento");

    let financing_input = request
        .form
        .into_input(request.asset_type)
        .map_err(|errors| ConsorcioError::Validation {
            consortium: Default::default(),
            financing: errors,
        })?;
    let result = compute_financing(&financing_input)?;
    debug!(
        monthly_rate = %result.monthly_rate,
        monthly_payment = %result.monthly_payment,
        "financiamento priced"
    );

    let mut warnings = Vec::new();
    if financing_input.annual_rate_percent.is_zero() {
        warnings.push("Annual interest rate is 0%; instalment is financed amount / term".to_string());
    }

    let output = with_metadata(
        "Financiamento: Sistema Price, monthly rate = (1 + annual)^(1/12) - 1",
        &financing_input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
