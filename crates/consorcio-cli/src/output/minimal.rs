use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use super::{cell, flatten};

/// Most useful single field per command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "comparison.savings_amount",
    "monthly_payment",
    "total_cost",
    "max_term_months",
    "max_asset_value",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let rows = flatten(body);

    for key in PRIORITY_KEYS {
        if let Some((_, val)) = rows.iter().find(|(k, v)| k == key && !v.is_null()) {
            return rounded(val);
        }
    }

    match rows.first() {
        Some((key, val)) if !key.is_empty() => format!("{key}: {}", cell(val)),
        Some((_, val)) => cell(val),
        None => cell(body),
    }
}

/// Amounts carry the full 28-digit precision; a single-value answer shows cents.
fn rounded(val: &Value) -> String {
    let text = cell(val);
    match Decimal::from_str(&text) {
        Ok(d) => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        Err(_) => text,
    }
}
