//! Error types for the GemBridge application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for configuration and wiring failures.
///
/// Generation failures never use this type; they travel as
/// [`GenerationError`](crate::generation::GenerationError) and end up in the
/// conversation state instead of being propagated.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GemBridgeError {
    /// Configuration error (missing credentials, unknown backend, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GemBridgeError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for GemBridgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GemBridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, GemBridgeError>`.
pub type Result<T> = std::result::Result<T, GemBridgeError>;
