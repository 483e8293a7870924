//! Configuration loading and command-line overrides.
//!
//! Pure schema lives in `domain::config`.

mod load_config;
mod overrides;

pub use load_config::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
pub use overrides::ConfigOverrides;
