//! Error types for vecbench.
//!
//! The kernels themselves cannot fail; errors only come from reading the
//! benchmark configuration.

use std::fmt;

/// Errors that can occur while setting up a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VecBenchError {
    /// A configuration value could not be parsed.
    ConfigError {
        /// The environment variable that was read.
        key: String,
        /// The raw value that was rejected.
        value: String,
        /// Human-readable error message.
        message: String,
    },
    /// A parsed configuration is not usable.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for VecBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VecBenchError::ConfigError {
                key,
                value,
                message,
            } => write!(
                f,
                "Invalid configuration: {} (key: {}, value: {:?})",
                message, key, value
            ),
            VecBenchError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for VecBenchError {}

/// Result type alias for vecbench operations.
pub type Result<T> = std::result::Result<T, VecBenchError>;

/// Creates a configuration error.
pub fn config_error(
    key: impl Into<String>,
    value: impl Into<String>,
    message: impl Into<String>,
) -> VecBenchError {
    VecBenchError::ConfigError {
        key: key.into(),
        value: value.into(),
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> VecBenchError {
    VecBenchError::ValidationError {
        message: message.into(),
    }
}
