use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use consorcio_core::comparison::compare;
use consorcio_core::config::{get_config, limits};
use consorcio_core::consortium::{compute_consortium, ConsortiumInput, ConsortiumResult};
use consorcio_core::financing::{compute_financing, FinancingInput, FinancingResult};
use consorcio_core::format;
use consorcio_core::simulation::{simulate, SimulationInput};
use consorcio_core::validation::{
    validate_consortium_input, validate_financing_input, ConsortiumForm, FinancingForm,
};
use consorcio_core::AssetType;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_asset_type(asset_type: Option<String>) -> NapiResult<AssetType> {
    match asset_type {
        Some(tag) => tag.parse().map_err(to_napi_error),
        None => Ok(AssetType::default()),
    }
}

fn parse_decimal(value: &str) -> NapiResult<Decimal> {
    value.trim().parse().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cost models
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_consortium_json(input_json: String) -> NapiResult<String> {
    let input: ConsortiumInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = compute_consortium(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_financing_json(input_json: String) -> NapiResult<String> {
    let input: FinancingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = compute_financing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_modalities(consortium_json: String, financing_json: String) -> NapiResult<String> {
    let consortium: ConsortiumResult =
        serde_json::from_str(&consortium_json).map_err(to_napi_error)?;
    let financing: FinancingResult =
        serde_json::from_str(&financing_json).map_err(to_napi_error)?;
    serde_json::to_string(&compare(&consortium, &financing)).map_err(to_napi_error)
}

#[napi]
pub fn simulate_json(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Returns the field → message map; `{}` when the form is valid.
#[napi]
pub fn validate_consortium(form_json: String, asset_type: Option<String>) -> NapiResult<String> {
    let form: ConsortiumForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let errors = validate_consortium_input(&form, parse_asset_type(asset_type)?);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

/// Returns the field → message map; `{}` when the form is valid.
#[napi]
pub fn validate_financing(form_json: String, asset_type: Option<String>) -> NapiResult<String> {
    let form: FinancingForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let errors = validate_financing_input(&form, parse_asset_type(asset_type)?);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[napi]
pub fn asset_config(asset_type: Option<String>) -> NapiResult<String> {
    let asset_type = parse_asset_type(asset_type)?;
    let value = serde_json::json!({
        "config": get_config(asset_type),
        "limits": limits(asset_type),
    });
    serde_json::to_string(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(value: String) -> NapiResult<String> {
    Ok(format::format_currency(parse_decimal(&value)?))
}

#[napi]
pub fn format_percent(value: String) -> NapiResult<String> {
    Ok(format::format_percent(parse_decimal(&value)?))
}

#[napi]
pub fn parse_currency(text: String) -> String {
    format::parse_currency(&text).to_string()
}
