use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use consorcio_core::consortium::compute_consortium;
use consorcio_core::validation::ConsortiumForm;
use consorcio_core::{with_metadata, AssetType, ConsorcioError};

use crate::input;

/// Arguments for a consórcio projection
#[derive(Args)]
pub struct ConsortiumArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset type: car or property
    #[arg(long, default_value = "car")]
    pub asset_type: AssetType,

    /// Price of the asset
    #[arg(long, allow_hyphen_values = true)]
    pub asset_value: Option<Decimal>,

    /// Lump-sum bid (lance)
    #[arg(long, allow_hyphen_values = true)]
    pub bid_amount: Option<Decimal>,

    /// Number of monthly instalments
    #[arg(long, allow_hyphen_values = true)]
    pub term_months: Option<i64>,

    /// Administrative fee in percent (e.g. 15 for 15%)
    #[arg(long, allow_hyphen_values = true)]
    pub admin_fee: Option<Decimal>,
}

/// JSON shape accepted by `--input` and stdin
#[derive(Debug, Deserialize)]
pub struct ConsortiumRequest {
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(flatten)]
    pub form: ConsortiumForm,
}

impl ConsortiumArgs {
    fn into_request(self) -> ConsortiumRequest {
        ConsortiumRequest {
            asset_type: self.asset_type,
            form: ConsortiumForm {
                asset_value: self.asset_value,
                bid_amount: self.bid_amount,
                term_months: self.term_months,
                administrative_fee_percent: self.admin_fee,
            },
        }
    }
}

pub fn run_consortium(args: ConsortiumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let request = match input::read_request::<ConsortiumRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => args.into_request(),
    };
    debug!(asset_type = %request.asset_type, "pricing consórcio");

    let consortium_input = request
        .form
        .into_input(request.asset_type)
        .map_err(|errors| ConsorcioError::Validation {
            consortium: errors,
            financing: Default::default(),
        })?;
    let result = compute_consortium(&consortium_input)?;
    debug!(monthly_payment = %result.monthly_payment, total_cost = %result.total_cost, "consórcio priced");

    let output = with_metadata(
        "Consórcio: (asset value × (1 + fee)) / term, bid added once to the total",
        &consortium_input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
