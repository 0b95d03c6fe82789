//! Configuration types for the Folio API server.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working
//! configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownConfigFlag;

// ---------------------------------------------------------------------------
// Top-level HostConfig
// ---------------------------------------------------------------------------

/// Root configuration for the API server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Public endpoint settings.
    pub server: ServerSection,
    /// Optional deployment capabilities.
    pub features: FeaturesSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

impl HostConfig {
    /// Take an immutable snapshot of the enabled capability flags.
    #[must_use]
    pub fn flags(&self) -> ConfigFlags {
        ConfigFlag::ALL
            .into_iter()
            .filter(|flag| self.features.is_enabled(*flag))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ServerSection
// ---------------------------------------------------------------------------

/// Public endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// URL the API is reachable at. Empty when not published.
    pub public_url: String,
}

// ---------------------------------------------------------------------------
// Capability flags
// ---------------------------------------------------------------------------

/// An optional capability a deployment may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFlag {
    /// Subscription billing.
    Billing,
    /// Outgoing e-mail delivery.
    Email,
    /// GitHub app integration for content sync.
    GithubApp,
    /// Sign-in with GitHub.
    GithubOauth,
    /// Extension hosting.
    Extensions,
    /// Full-text content search.
    Search,
    /// Writing assistant.
    Assistant,
    /// Usage analytics.
    Analytics,
}

impl ConfigFlag {
    /// Every capability flag.
    pub const ALL: [Self; 8] = [
        Self::Billing,
        Self::Email,
        Self::GithubApp,
        Self::GithubOauth,
        Self::Extensions,
        Self::Search,
        Self::Assistant,
        Self::Analytics,
    ];

    /// Key of the flag in the `[features]` table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Email => "email",
            Self::GithubApp => "github_app",
            Self::GithubOauth => "github_oauth",
            Self::Extensions => "extensions",
            Self::Search => "search",
            Self::Assistant => "assistant",
            Self::Analytics => "analytics",
        }
    }

    /// Environment variable overriding the flag (e.g. `FOLIO_GITHUB_APP`).
    #[must_use]
    pub fn env_var(&self) -> String {
        format!("FOLIO_{}", self.as_str().to_ascii_uppercase())
    }
}

impl fmt::Display for ConfigFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFlag {
    type Err = UnknownConfigFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| UnknownConfigFlag(s.to_string()))
    }
}

/// Optional deployment capabilities, all disabled by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeaturesSection {
    /// Subscription billing.
    pub billing: bool,
    /// Outgoing e-mail delivery.
    pub email: bool,
    /// GitHub app integration.
    pub github_app: bool,
    /// Sign-in with GitHub.
    pub github_oauth: bool,
    /// Extension hosting.
    pub extensions: bool,
    /// Full-text search.
    pub search: bool,
    /// Writing assistant.
    pub assistant: bool,
    /// Usage analytics.
    pub analytics: bool,
}

impl FeaturesSection {
    /// Whether `flag` is switched on.
    #[must_use]
    pub const fn is_enabled(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::Billing => self.billing,
            ConfigFlag::Email => self.email,
            ConfigFlag::GithubApp => self.github_app,
            ConfigFlag::GithubOauth => self.github_oauth,
            ConfigFlag::Extensions => self.extensions,
            ConfigFlag::Search => self.search,
            ConfigFlag::Assistant => self.assistant,
            ConfigFlag::Analytics => self.analytics,
        }
    }

    /// Switch `flag` on or off.
    pub fn set(&mut self, flag: ConfigFlag, enabled: bool) {
        let slot = match flag {
            ConfigFlag::Billing => &mut self.billing,
            ConfigFlag::Email => &mut self.email,
            ConfigFlag::GithubApp => &mut self.github_app,
            ConfigFlag::GithubOauth => &mut self.github_oauth,
            ConfigFlag::Extensions => &mut self.extensions,
            ConfigFlag::Search => &mut self.search,
            ConfigFlag::Assistant => &mut self.assistant,
            ConfigFlag::Analytics => &mut self.analytics,
        };
        *slot = enabled;
    }
}

/// Read-only snapshot of the enabled capability flags.
///
/// Taken once from a [`HostConfig`] and shared by every call; a flag that is
/// absent from the snapshot counts as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFlags {
    enabled: BTreeSet<ConfigFlag>,
}

impl ConfigFlags {
    /// Snapshot with every capability disabled.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Snapshot with every capability enabled.
    #[must_use]
    pub fn all() -> Self {
        ConfigFlag::ALL.into_iter().collect()
    }

    /// Whether `flag` is enabled.
    #[must_use]
    pub fn is_enabled(&self, flag: ConfigFlag) -> bool {
        self.enabled.contains(&flag)
    }

    /// Enabled flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ConfigFlag> + '_ {
        self.enabled.iter().copied()
    }
}

impl FromIterator<ConfigFlag> for ConfigFlags {
    fn from_iter<I: IntoIterator<Item = ConfigFlag>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["folio_guard=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_everything() {
        let config = HostConfig::default();
        assert_eq!(config.flags(), ConfigFlags::none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_flags_snapshot() {
        let mut config = HostConfig::default();
        config.features.set(ConfigFlag::Search, true);
        config.features.set(ConfigFlag::Email, true);

        let flags = config.flags();
        assert!(flags.is_enabled(ConfigFlag::Search));
        assert!(flags.is_enabled(ConfigFlag::Email));
        assert!(!flags.is_enabled(ConfigFlag::Billing));
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![ConfigFlag::Email, ConfigFlag::Search]
        );

        // Later changes do not leak into an existing snapshot.
        config.features.set(ConfigFlag::Billing, true);
        assert!(!flags.is_enabled(ConfigFlag::Billing));
    }

    #[test]
    fn test_flag_names() {
        for flag in ConfigFlag::ALL {
            assert_eq!(flag.as_str().parse::<ConfigFlag>().unwrap(), flag);
            let json = serde_json::to_string(&flag).unwrap();
            assert_eq!(json, format!("\"{}\"", flag.as_str()));
        }
        assert_eq!(ConfigFlag::GithubApp.env_var(), "FOLIO_GITHUB_APP");
        let err = "teleport".parse::<ConfigFlag>().unwrap_err();
        assert_eq!(err, UnknownConfigFlag("teleport".to_string()));
        assert_eq!(err.to_string(), "unknown capability flag: teleport");
    }

    #[test]
    fn test_all_snapshot() {
        let flags = ConfigFlags::all();
        assert!(ConfigFlag::ALL.iter().all(|f| flags.is_enabled(*f)));
    }
}
