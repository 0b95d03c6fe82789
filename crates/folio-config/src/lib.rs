#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Host configuration for the Folio API server.
//!
//! The [`HostConfig`] describes which optional capabilities the deployment
//! provides (billing, e-mail delivery, search, ...). Operations declare the
//! capabilities they need; the capability guard checks them against an
//! immutable [`ConfigFlags`] snapshot taken from the loaded configuration.
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_config::{ConfigFlag, HostConfig};
//!
//! let resolved = HostConfig::load(None).unwrap();
//! let flags = resolved.config.flags();
//! println!("search enabled: {}", flags.is_enabled(ConfigFlag::Search));
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`FOLIO_*`)
//! 2. **Config file** (explicit path, `FOLIO_CONFIG`, or the user config dir)
//! 3. **Embedded defaults** (`defaults.toml` compiled into binary)

/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult, UnknownConfigFlag};
pub use loader::ResolvedConfig;
pub use types::*;

impl HostConfig {
    /// Load configuration with the full precedence chain, reading the
    /// process environment.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file is malformed, an
    /// environment override cannot be parsed, or the final configuration
    /// fails validation.
    pub fn load(config_path: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(config_path, &env::collect_env_vars())
    }

    /// Load configuration from a single file (no layering, no environment).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
