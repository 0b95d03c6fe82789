//! `FOLIO_*` environment variable overrides.
//!
//! Environment values take precedence over every file layer. Capability
//! flags map to `FOLIO_<FLAG>` (see [`ConfigFlag::env_var`]).

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::types::ConfigFlag;

/// Prefix of every variable this crate reads.
pub const ENV_PREFIX: &str = "FOLIO_";

/// Path of an explicit config file.
pub const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG";

/// Scalar string overrides: variable, section, key.
const STRING_OVERRIDES: [(&str, &str, &str); 3] = [
    ("FOLIO_PUBLIC_URL", "server", "public_url"),
    ("FOLIO_LOG_LEVEL", "logging", "level"),
    ("FOLIO_LOG_FORMAT", "logging", "format"),
];

/// Snapshot the `FOLIO_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect()
}

/// Apply environment overrides to the merged TOML tree.
///
/// Returns the number of values that were overridden.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a flag variable is not a boolean.
pub fn apply_env_overrides(
    merged: &mut toml::Value,
    env: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied = 0usize;

    for flag in ConfigFlag::ALL {
        let var = flag.env_var();
        if let Some(raw) = env.get(&var) {
            let enabled = parse_bool(raw).ok_or_else(|| ConfigError::EnvError {
                var: var.clone(),
                message: format!("expected a boolean, got '{raw}'"),
            })?;
            set_value(merged, "features", flag.as_str(), toml::Value::Boolean(enabled));
            debug!(var = %var, enabled, "capability flag overridden from environment");
            applied = applied.saturating_add(1);
        }
    }

    for (var, section, key) in STRING_OVERRIDES {
        if let Some(raw) = env.get(var) {
            set_value(merged, section, key, toml::Value::String(raw.clone()));
            applied = applied.saturating_add(1);
        }
    }

    Ok(applied)
}

/// Interpret common boolean spellings.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn set_value(root: &mut toml::Value, section: &str, key: &str, value: toml::Value) {
    let toml::Value::Table(root) = root else {
        return;
    };
    let entry = root
        .entry(section.to_owned())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    if !entry.is_table() {
        *entry = toml::Value::Table(toml::map::Map::new());
    }
    if let toml::Value::Table(table) = entry {
        table.insert(key.to_owned(), value);
    }
}
