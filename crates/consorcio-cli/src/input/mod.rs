pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Resolve a typed request from `--input`, then piped stdin. `None` means the
/// caller should fall back to individual flags.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading request from file");
        return Ok(Some(file::read_json(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        debug!("reading request from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}
