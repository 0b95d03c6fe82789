use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// Path of the file (or a synthetic name for merged trees).
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// An environment override could not be interpreted.
    #[error("invalid value for environment variable {var}: {message}")]
    EnvError {
        /// The offending variable.
        var: String,
        /// What was wrong with it.
        message: String,
    },

    /// The merged configuration violates a validation rule.
    #[error("invalid configuration for {field}: {message}")]
    ValidationError {
        /// Dotted path of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
}

/// A string that names no known capability flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability flag: {0}")]
pub struct UnknownConfigFlag(pub String);

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
