use serde_json::Value;

/// Pretty-print JSON to stdout; compact when piped so each result is one line.
pub fn print_json(value: &Value) {
    let pretty = atty::is(atty::Stream::Stdout);
    match render_json(value, pretty) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn render_json(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
