//! Run configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, RunConfig};

/// Conventional config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "playrun.toml";

/// Load and parse the run configuration at `path`.
///
/// Validation is left to the caller so command-line overrides can be merged
/// first.
pub fn load_config(path: &Path) -> Result<RunConfig, AppError> {
    if !path.exists() {
        return Err(AppError::ConfigNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse run configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<RunConfig, AppError> {
    Ok(toml::from_str(content)?)
}
