//! # Vehicle Protocol Configuration
//!
//! Loaded once at startup from TOML.
//!
//! ```toml
//! interaction_distance = 5.0
//! report_rejections = true
//! ```

use std::path::Path;

use howdah_shared::INTERACTION_DISTANCE;
use serde::Deserialize;

use crate::error::ConfigError;

/// Tunables for the occupancy core.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Range within which a player may board another player's vehicle.
    pub interaction_distance: f32,
    /// Log diagnostic rejections (seat flags, eject failures).
    pub report_rejections: bool,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            interaction_distance: INTERACTION_DISTANCE,
            report_rejections: true,
        }
    }
}

impl VehicleConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = VehicleConfig::from_toml_str("").unwrap();
        assert_eq!(config, VehicleConfig::default());
        assert!((config.interaction_distance - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = VehicleConfig::from_toml_str("report_rejections = false").unwrap();
        assert!(!config.report_rejections);
        assert!(
            (config.interaction_distance - INTERACTION_DISTANCE).abs() < f32::EPSILON
        );
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let err = VehicleConfig::from_toml_str("interaction_distance = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = VehicleConfig::load("/nonexistent/howdah.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
