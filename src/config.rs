//! Configuration management for rigpill
//!
//! Loads the YAML configuration used by the command line runner: logging
//! setup, the plugin's extended settings and where to read device status
//! reports from.

use crate::error::{RigPillError, Result};
use crate::logging::parse_log_level;
use crate::rig::keys;
use crate::sandbox::ExtendedSettings;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

mod defaults;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Extended settings handed to the rig plugin (`fields`, `warnLastPing`,
    /// `urgentLastPing`, `warnLoad`, `urgentLoad`, `enableAlerts`)
    pub settings: ExtendedSettings,

    /// JSON file holding an array of device status reports
    pub devicestatus_file: String,

    /// Treat the loop as known offline (suppresses alerting)
    pub offline: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Path to log file; its directory receives the daily rolled files
    pub file: String,

    /// Number of rolled files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        let default_paths = ["rigpill.yaml", "/etc/rigpill/config.yaml"];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Self::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        parse_log_level(&self.logging.level)
            .map_err(|e| RigPillError::validation("logging.level", e.to_string()))?;

        if self.devicestatus_file.trim().is_empty() {
            return Err(RigPillError::validation(
                "devicestatus_file",
                "Path cannot be empty",
            ));
        }

        for key in keys::THRESHOLDS {
            let Some(value) = self.settings.get(key) else {
                continue;
            };
            let number = match value {
                Value::Null => continue,
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            if !number.is_some_and(|n| n.is_finite() && n > 0.0) {
                return Err(RigPillError::validation(
                    format!("settings.{key}"),
                    "Must be a positive number".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "INFO");
        assert_eq!(config.devicestatus_file, "devicestatus.json");
        assert!(config.settings.is_empty());
        assert!(!config.offline);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "LOUD".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.devicestatus_file = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_validation() {
        let mut config = Config::default();
        config
            .settings
            .insert("warnLoad".to_string(), Value::String("3".into()));
        assert!(config.validate().is_ok());

        config
            .settings
            .insert("urgentLastPing".to_string(), Value::from(-1));
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: settings.urgentLastPing - Must be a positive number"
        );
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config
            .settings
            .insert("fields".to_string(), Value::String("wifi%20load".into()));
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(deserialized.settings, config.settings);
        assert_eq!(deserialized.devicestatus_file, config.devicestatus_file);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("offline: true\n").unwrap();
        assert!(config.offline);
        assert_eq!(config.logging.level, "INFO");
        assert_eq!(config.devicestatus_file, "devicestatus.json");
    }
}
