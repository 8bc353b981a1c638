use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a simulation request (or a single-modality form) from a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let location = locate(path)?;
    let contents = fs::read_to_string(&location)
        .map_err(|e| format!("Failed to read '{}': {}", location.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid request in '{}': {}", location.display(), e).into())
}

fn locate(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let location = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !location.is_file() {
        let reason = if location.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{reason}: {}", location.display()).into());
    }
    Ok(location)
}
