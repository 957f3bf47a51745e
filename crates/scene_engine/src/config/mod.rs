//! Configuration system
//!
//! Scene-wide defaults are loaded from `.toml` or `.ron` files:
//!
//! ```toml
//! sort_axis = "y"
//! auto_sort = true
//!
//! [logging]
//! filter = "scene_engine=debug"
//! ```

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::foundation::logging::LoggingConfig;
use crate::scene::SortAxis;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("ron") => Self::from_ron_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Scene-wide defaults applied to newly created containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Sort axis given to new containers
    pub sort_axis: SortAxis,
    /// Whether new containers re-sort automatically on append
    pub auto_sort: bool,
    /// Logger settings
    pub logging: LoggingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sort_axis: SortAxis::Z,
            auto_sort: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.sort_axis, SortAxis::Z);
        assert!(config.auto_sort);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config = SceneConfig::from_toml_str(
            r#"
            sort_axis = "y"
            auto_sort = false

            [logging]
            filter = "scene_engine=debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.sort_axis, SortAxis::Y);
        assert!(!config.auto_sort);
        assert_eq!(config.logging.filter.as_deref(), Some("scene_engine=debug"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SceneConfig::from_toml_str("sort_axis = \"x\"").unwrap();
        assert_eq!(config.sort_axis, SortAxis::X);
        assert!(config.auto_sort);
    }

    #[test]
    fn test_parse_ron() {
        let config = SceneConfig::from_ron_str("(sort_axis: x, auto_sort: false)").unwrap();
        assert_eq!(config.sort_axis, SortAxis::X);
        assert!(!config.auto_sort);
    }

    #[test]
    fn test_rejects_unknown_axis() {
        let result = SceneConfig::from_toml_str("sort_axis = \"w\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::load_from_file("scene.json");
        assert!(matches!(result, Err(ConfigError::Io(_) | ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = std::env::temp_dir().join(format!("scene_config_{}.toml", std::process::id()));
        let config = SceneConfig { sort_axis: SortAxis::Y, auto_sort: false, ..SceneConfig::default() };

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
