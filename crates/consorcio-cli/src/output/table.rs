use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell, flatten};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let body = map.get("result").unwrap_or(value);
            let mut out = field_table(body);

            if let Some(Value::Array(warnings)) = map.get("warnings") {
                if !warnings.is_empty() {
                    out.push_str("\n\nWarnings:");
                    for w in warnings.iter().filter_map(Value::as_str) {
                        out.push_str(&format!("\n  - {w}"));
                    }
                }
            }
            if let Some(Value::String(meth)) = map.get("methodology") {
                out.push_str(&format!("\n\nMethodology: {meth}"));
            }
            out
        }
        Value::Array(rows) => array_table(rows),
        other => cell(other),
    }
}

fn field_table(body: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(body) {
        builder.push_record([key, cell(&val)]);
    }
    Table::from(builder).to_string()
}

fn array_table(rows: &[Value]) -> String {
    let Some(first) = rows.first() else {
        return "(empty)".to_string();
    };
    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for row in rows {
        let flat = flatten(row);
        let record: Vec<String> = headers
            .iter()
            .map(|h| {
                flat.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| cell(v))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(record);
    }
    Table::from(builder).to_string()
}
