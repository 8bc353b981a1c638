pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod report;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Report => report::print_report(value),
    }
}

/// Nested objects become dotted keys (`comparison.savings_amount`) so the
/// simulation result fits a two-column layout. Arrays are kept whole.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&path, val, rows);
            }
        }
        other => rows.push((prefix.to_string(), other.clone())),
    }
}

/// Plain-text rendering of a scalar for table and CSV cells.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let rows = flatten(&json!({
            "consortium": { "monthly_payment": "958.33" },
            "comparison": { "consortium_is_better": true },
        }));
        assert_eq!(
            rows,
            vec![
                ("comparison.consortium_is_better".to_string(), json!(true)),
                ("consortium.monthly_payment".to_string(), json!("958.33")),
            ]
        );
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(&json!("R$")), "R$");
        assert_eq!(cell(&json!(60)), "60");
        assert_eq!(cell(&json!(null)), "");
        assert_eq!(cell(&json!(["a", "b"])), "a, b");
    }
}
