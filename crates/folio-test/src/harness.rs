//! Test harness helpers.

use std::io::Write;
use std::path::PathBuf;

use folio_config::HostConfig;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Set up test logging with the given filter.
///
/// Safe to call from many tests; only the first call installs a subscriber.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

/// A temporary directory holding a `config.toml`.
#[derive(Debug)]
pub struct TestConfigDir {
    /// Temporary directory, removed on drop.
    pub dir: TempDir,
    /// Path of the written config file.
    pub path: PathBuf,
}

impl TestConfigDir {
    /// Write `content` to a fresh `config.toml`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or file cannot be created.
    #[must_use]
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("Failed to create config file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config file");
        Self { dir, path }
    }

    /// Load the file with no environment overrides.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    #[must_use]
    pub fn load(&self) -> HostConfig {
        HostConfig::load_file(&self.path).expect("Failed to load test config")
    }
}
