//! Configuration system
//!
//! Provides file-backed configuration (TOML or RON) and the tuning knobs of
//! the zone manager.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
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

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Upper bound on `max_object_zones`
pub const MAX_OBJECT_ZONES_LIMIT: usize = 1024;

/// # Zoning Configuration
///
/// Tuning for the zone manager. All fields have defaults, so a config file
/// only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningConfig {
    /// Maximum number of zones a single object can be a member of
    pub max_object_zones: usize,
    /// Half-size of the box used to look up the zone containing a point
    pub point_query_extent: f32,
    /// Run the full state verification after every area rezone
    pub verify_after_update: bool,
    /// Default log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl ZoningConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            max_object_zones: 128,
            point_query_extent: 0.1,
            verify_after_update: false,
            log_level: "info".to_string(),
        }
    }

    /// Set the per-object zone capacity
    pub fn with_max_object_zones(mut self, max: usize) -> Self {
        self.max_object_zones = max;
        self
    }

    /// Set the point query half-size
    pub fn with_point_query_extent(mut self, extent: f32) -> Self {
        self.point_query_extent = extent;
        self
    }

    /// Enable or disable verification after each update
    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_after_update = enabled;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_object_zones == 0 {
            return Err(ConfigError::Invalid("max_object_zones must be at least 1".to_string()));
        }

        if self.max_object_zones > MAX_OBJECT_ZONES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_object_zones must not exceed {}",
                MAX_OBJECT_ZONES_LIMIT
            )));
        }

        if !(self.point_query_extent > 0.0 && self.point_query_extent.is_finite()) {
            return Err(ConfigError::Invalid("point_query_extent must be positive".to_string()));
        }

        Ok(())
    }
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ZoningConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ZoningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_object_zones, 128);
        assert!(!config.verify_after_update);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ZoningConfig::new().with_max_object_zones(0).validate().is_err());
        assert!(ZoningConfig::new().with_max_object_zones(4096).validate().is_err());
        assert!(ZoningConfig::new().with_point_query_extent(0.0).validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ZoningConfig = toml::from_str("verify_after_update = true\n").unwrap();
        assert!(config.verify_after_update);
        assert_eq!(config.max_object_zones, 128);
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("zoning_config_{}.ron", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        let config = ZoningConfig::new().with_max_object_zones(16).with_verification(true);
        config.save_to_file(&path).unwrap();
        let loaded = ZoningConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ZoningConfig::load_from_file("zoning.yaml");
        // Missing file is reported before the extension is checked
        assert!(matches!(result, Err(ConfigError::Io(_))));
        assert!(matches!(
            ZoningConfig::default().save_to_file("zoning.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
