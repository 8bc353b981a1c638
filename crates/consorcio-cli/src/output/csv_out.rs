use serde_json::Value;
use std::io;

use super::{cell, flatten};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV output error: {e}");
    }
}

/// `field,value` rows for a result envelope; one row per element for arrays.
fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Array(rows) => write_rows(wtr, rows)?,
        Value::Object(map) => {
            let body = map.get("result").unwrap_or(value);
            wtr.write_record(["field", "value"])?;
            for (key, val) in flatten(body) {
                wtr.write_record([key.as_str(), &cell(&val)])?;
            }
        }
        other => wtr.write_record([cell(other)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    wtr.write_record(&headers)?;

    for row in rows {
        let flat: std::collections::HashMap<String, Value> = flatten(row).into_iter().collect();
        let record: Vec<String> = headers
            .iter()
            .map(|h| flat.get(h).map(cell).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
