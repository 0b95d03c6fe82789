//! Config file discovery and layered loading.
//!
//! Implements the `HostConfig::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the config file (explicit path, `FOLIO_CONFIG`, or
//!    `{user config dir}/folio/config.toml`)
//! 3. Apply `FOLIO_*` environment overrides
//! 4. Deserialize merged tree → `HostConfig`
//! 5. Validate
//! 6. Return `ResolvedConfig`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{CONFIG_PATH_VAR, apply_env_overrides};
use crate::error::{ConfigError, ConfigResult};
use crate::types::HostConfig;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: HostConfig,
    /// Config files that contributed, in merge order.
    pub loaded_files: Vec<String>,
    /// Number of values overridden from the environment.
    pub env_overrides: usize,
}

/// Load the configuration with layered precedence.
///
/// `config_path` names an explicit file, which must exist. Without it,
/// `FOLIO_CONFIG` (from `env`) is consulted, then the user config directory;
/// a missing discovered file is skipped.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a config file is malformed, an environment
/// override is invalid, or the final configuration fails validation.
pub fn load(
    config_path: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut loaded_files = Vec::new();

    // 2. Config file.
    let overlay = if let Some(path) = config_path {
        Some((read_file(path)?, path.to_path_buf()))
    } else if let Some(path) = env.get(CONFIG_PATH_VAR) {
        let path = PathBuf::from(path);
        Some((read_file(&path)?, path))
    } else if let Some(path) = user_config_path() {
        try_load_file(&path)?.map(|overlay| (overlay, path))
    } else {
        None
    };

    if let Some((overlay, path)) = overlay {
        deep_merge(&mut merged, &overlay);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded config file");
    }

    // 3. Environment overrides.
    let env_overrides = apply_env_overrides(&mut merged, env)?;
    if env_overrides > 0 {
        debug!(count = env_overrides, "applied environment overrides");
    }

    // 4. Deserialize.
    let config: HostConfig =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 5. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
        env_overrides,
    })
}

/// Load a config from a specific file path (no layering).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or
/// fails validation.
pub fn load_file(path: &Path) -> ConfigResult<HostConfig> {
    let value = read_file(path)?;
    let config: HostConfig = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// `{user config dir}/folio/config.toml`, if a home directory is known.
fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Read and parse a file that must exist.
fn read_file(path: &Path) -> ConfigResult<toml::Value> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
    read_checked(path, metadata.len())
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(read_error(path, e)),
    };
    read_checked(path, metadata.len()).map(Some)
}

/// Enforce the size limit from metadata, then read and parse.
fn read_checked(path: &Path, len: u64) -> ConfigResult<toml::Value> {
    if len > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {len} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    }
}
