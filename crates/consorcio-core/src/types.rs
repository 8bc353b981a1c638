use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConsorcioError;

/// All monetary values (BRL). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentage points as entered by the user (15 = 15%).
pub type Percent = Decimal;

/// Rates expressed as decimals (0.0095 = 0.95%).
pub type Rate = Decimal;

/// Term length in months
pub type Months = u32;

/// Kind of asset being acquired. Drives term ceilings and value limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    #[serde(alias = "carro")]
    Car,
    #[serde(alias = "imovel")]
    Property,
}

impl AssetType {
    pub const ALL: [AssetType; 2] = [AssetType::Car, AssetType::Property];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Car => "car",
            AssetType::Property => "property",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ConsorcioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" | "carro" => Ok(AssetType::Car),
            "property" | "imovel" | "imóvel" => Ok(AssetType::Property),
            other => Err(ConsorcioError::InvalidInput {
                field: "asset_type".into(),
                reason: format!("Unknown asset type '{other}' (expected 'car' or 'property')"),
            }),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
