//! # Host Error Types
//!
//! Errors only come from the edges: config files, cart files, CLI usage.
//! Hook callbacks never fail; missing host data falls back to defaults.

use franco_core::CoreError;
use thiserror::Error;

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// No location to save the config to.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Cart or rate payload is not valid JSON.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line usage error.
    #[error("{0}")]
    Usage(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use franco_core::ValidationError;

    #[test]
    fn test_error_messages() {
        let err = HostError::InvalidConfig("role is required".into());
        assert_eq!(err.to_string(), "Invalid configuration: role is required");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let core: CoreError = ValidationError::Negative {
            field: "slot threshold".into(),
        }
        .into();
        let err: HostError = core.into();
        assert_eq!(
            err.to_string(),
            "Validation error: slot threshold must not be negative"
        );
    }
}
