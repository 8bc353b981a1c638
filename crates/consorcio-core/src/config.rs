use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{AssetType, Money, Months, Percent};

/// Smallest asset value accepted for either asset type.
pub const MIN_ASSET_VALUE: Money = dec!(1000);
/// Shortest term offered by either modality.
pub const MIN_TERM_MONTHS: Months = 12;
/// Upper bound on the consórcio administrative fee.
pub const MAX_ADMIN_FEE_PERCENT: Percent = dec!(100);
/// Upper bound on the nominal annual financing rate.
pub const MAX_ANNUAL_RATE_PERCENT: Percent = dec!(50);

/// Display labels for an asset type (pt-BR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetLabels {
    pub asset_value: &'static str,
    pub value_placeholder: &'static str,
    pub description: &'static str,
}

/// Per-asset-type limits and labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetConfig {
    pub term_ceiling_months: Months,
    pub suggested_max_value: Money,
    pub labels: AssetLabels,
}

static CAR: AssetConfig = AssetConfig {
    term_ceiling_months: 60,
    suggested_max_value: dec!(300000),
    labels: AssetLabels {
        asset_value: "Valor do Veículo",
        value_placeholder: "Ex: 50.000",
        description: "Consórcio ou Financiamento de Veículo",
    },
};

static PROPERTY: AssetConfig = AssetConfig {
    term_ceiling_months: 360,
    suggested_max_value: dec!(2000000),
    labels: AssetLabels {
        asset_value: "Valor do Imóvel",
        value_placeholder: "Ex: 500.000",
        description: "Consórcio ou Financiamento Imobiliário",
    },
};

/// Look up the static configuration for an asset type.
pub fn get_config(asset_type: AssetType) -> &'static AssetConfig {
    match asset_type {
        AssetType::Car => &CAR,
        AssetType::Property => &PROPERTY,
    }
}

/// Every bound the validator enforces for one asset type, flattened for UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Limits {
    pub asset_type: AssetType,
    pub min_asset_value: Money,
    pub max_asset_value: Money,
    pub min_term_months: Months,
    pub max_term_months: Months,
    pub min_percent: Percent,
    pub max_admin_fee_percent: Percent,
    pub max_annual_rate_percent: Percent,
}

pub fn limits(asset_type: AssetType) -> Limits {
    let config = get_config(asset_type);
    Limits {
        asset_type,
        min_asset_value: MIN_ASSET_VALUE,
        max_asset_value: config.suggested_max_value,
        min_term_months: MIN_TERM_MONTHS,
        max_term_months: config.term_ceiling_months,
        min_percent: Decimal::ZERO,
        max_admin_fee_percent: MAX_ADMIN_FEE_PERCENT,
        max_annual_rate_percent: MAX_ANNUAL_RATE_PERCENT,
    }
}
