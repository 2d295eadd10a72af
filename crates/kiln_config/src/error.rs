//! Error types for configuration loading and validation.

/// Errors that can occur when loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading a descriptor or probing the application.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML descriptor could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A boolean configuration value was not recognised.
    #[error("invalid boolean value '{value}' for ${key}")]
    InvalidBool {
        /// The configuration key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
