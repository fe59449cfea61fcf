//! Error types and handling for rigpill
//!
//! The plugin hooks themselves never fail: missing or malformed host data
//! degrades to defaults. These errors cover the ambient layer around them,
//! i.e. configuration, logging setup and loading report files.

use thiserror::Error;

/// Result type alias for rigpill operations
pub type Result<T> = std::result::Result<T, RigPillError>;

/// Main error type for rigpill
#[derive(Debug, Error)]
pub enum RigPillError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl RigPillError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RigPillError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for RigPillError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for RigPillError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
