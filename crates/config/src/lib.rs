//! Configuration loading for Stratus clients
//!
//! Provides utilities for loading and storing configuration files in the
//! shared Stratus config directory (~/.config/stratus/). App credentials
//! and stored access tokens both live here.
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Initialize the Stratus config directory.
///
/// Creates ~/.config/stratus/ if it doesn't exist.
/// Call this once at application startup.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// Get the Stratus config directory (~/.config/stratus/)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stratus"))
}

/// Get the path to a config file within the Stratus config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Load and parse a JSON config file from the Stratus config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Check if a config file exists in the Stratus config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Ensure the Stratus config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Save a value as JSON to a config file in the Stratus config directory
pub fn save_json<T: serde::Serialize>(filename: &str, value: &T) -> Result<()> {
    let dir = ensure_config_dir()?;
    let path = dir.join(filename);
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

/// Delete a config file from the Stratus config directory.
///
/// Missing files are not an error (deleting twice is fine).
pub fn delete_config(filename: &str) -> Result<()> {
    let path = config_path(filename).context("Could not determine config directory")?;
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete config file: {}", path.display()))?;
    }
    Ok(())
}
