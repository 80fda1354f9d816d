//! Error types for configuration loading and validation.

/// Why a `globguard.toml` could not be turned into a [`ProjectConfig`](crate::ProjectConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("cannot read globguard.toml: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("invalid globguard.toml: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
