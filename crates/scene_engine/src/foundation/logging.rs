//! Logging utilities and structured logging support

use serde::{Deserialize, Serialize};

pub use log::{debug, error, info, trace, warn};

/// Logger settings, usually read from the `[logging]` table of a scene config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter string (e.g. `"scene_engine=debug"`).
    /// Falls back to `RUST_LOG`, then to `info`.
    pub filter: Option<String>,
}

/// Initialize the logging system
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init(config: &LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    if builder.try_init().is_ok() {
        debug!("logging initialized");
    }
}
