use clap::Args;
use serde_json::{json, Value};

use consorcio_core::config::{get_config, limits};
use consorcio_core::AssetType;

/// Arguments for the limits lookup
#[derive(Args)]
pub struct LimitsArgs {
    /// Asset type: car or property. Omit to list both.
    #[arg(long)]
    pub asset_type: Option<AssetType>,
}

pub fn run_limits(args: LimitsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.asset_type {
        Some(asset_type) => describe(asset_type),
        None => {
            let all = AssetType::ALL
                .into_iter()
                .map(describe)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(all))
        }
    }
}

fn describe(asset_type: AssetType) -> Result<Value, Box<dyn std::error::Error>> {
    let config = get_config(asset_type);
    let mut value = serde_json::to_value(limits(asset_type))?;
    if let Value::Object(map) = &mut value {
        map.insert("label".into(), json!(config.labels.asset_value));
        map.insert("description".into(), json!(config.labels.description));
    }
    Ok(value)
}
