//! Post-merge configuration validation.
//!
//! Validates that deserialized [`HostConfig`](crate::HostConfig) values are
//! within acceptable ranges and that cross-field invariants hold.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ConfigFlag, HostConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &HostConfig) -> ConfigResult<()> {
    validate_server(config)?;
    validate_features(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_server(config: &HostConfig) -> ConfigResult<()> {
    let url = config.server.public_url.trim();
    if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "server.public_url".to_owned(),
            message: format!("'{url}' must start with http:// or https://"),
        });
    }
    Ok(())
}

/// GitHub integrations redirect back to the API, so they need a public URL.
fn validate_features(config: &HostConfig) -> ConfigResult<()> {
    for flag in [ConfigFlag::GithubApp, ConfigFlag::GithubOauth] {
        if config.features.is_enabled(flag) && config.server.public_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("features.{flag}"),
                message: "requires server.public_url to be set".to_owned(),
            });
        }
    }
    Ok(())
}

fn validate_logging(config: &HostConfig) -> ConfigResult<()> {
    let logging = &config.logging;

    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported level '{}'; expected one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported format '{}'; expected one of: {}",
                logging.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }

    if let Some(bad) = logging.directives.iter().find(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "logging.directives".to_owned(),
            message: format!("empty directive '{bad}'"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate(&HostConfig::default()).is_ok());
    }

    #[test]
    fn test_github_requires_public_url() {
        let mut config = HostConfig::default();
        config.features.set(ConfigFlag::GithubApp, true);

        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "features.github_app"
        ));

        config.server.public_url = "https://api.example.com".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_public_url_scheme() {
        let mut config = HostConfig::default();
        config.server.public_url = "ftp://example.com".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_logging_rules() {
        let mut config = HostConfig::default();
        config.logging.level = "loud".to_owned();
        assert!(validate(&config).is_err());

        let mut config = HostConfig::default();
        config.logging.format = "xml".to_owned();
        assert!(validate(&config).is_err());

        let mut config = HostConfig::default();
        config.logging.level = "DEBUG".to_owned();
        assert!(validate(&config).is_ok());
    }
}
