//! Permission vocabularies.
//!
//! Sessions and API tokens are checked against two separate enums. A
//! requirement declares each set independently, so a permission that only
//! makes sense for one credential kind cannot be attached to the other.
//! Administrative access is not a permission: it lives on the session's
//! [`BaseType`](crate::BaseType).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a permission name is not part of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {vocabulary} permission: {name}")]
pub struct UnknownPermission {
    /// Which vocabulary was being parsed.
    pub vocabulary: &'static str,
    /// The unrecognised name.
    pub name: String,
}

/// Permissions held by interactive user sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPermission {
    /// Read content pieces and groups.
    ReadContent,
    /// Create and edit content.
    WriteContent,
    /// Edit content metadata (tags, custom fields).
    EditMetadata,
    /// Change dashboard layout and views.
    ManageDashboard,
    /// Issue and revoke API tokens.
    ManageTokens,
    /// Configure outgoing webhooks.
    ManageWebhooks,
    /// Change workspace settings and membership.
    ManageWorkspace,
    /// Install and configure extensions.
    ManageExtensions,
    /// Manage content variants.
    ManageVariants,
}

impl SessionPermission {
    /// Every session permission.
    pub const ALL: [Self; 9] = [
        Self::ReadContent,
        Self::WriteContent,
        Self::EditMetadata,
        Self::ManageDashboard,
        Self::ManageTokens,
        Self::ManageWebhooks,
        Self::ManageWorkspace,
        Self::ManageExtensions,
        Self::ManageVariants,
    ];

    /// Wire name of the permission.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadContent => "readContent",
            Self::WriteContent => "writeContent",
            Self::EditMetadata => "editMetadata",
            Self::ManageDashboard => "manageDashboard",
            Self::ManageTokens => "manageTokens",
            Self::ManageWebhooks => "manageWebhooks",
            Self::ManageWorkspace => "manageWorkspace",
            Self::ManageExtensions => "manageExtensions",
            Self::ManageVariants => "manageVariants",
        }
    }
}

impl fmt::Display for SessionPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionPermission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission {
                vocabulary: "session",
                name: s.to_string(),
            })
    }
}

/// Permissions held by long-lived API tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenPermission {
    /// Read content pieces.
    ReadContent,
    /// Create and edit content pieces.
    WriteContent,
    /// Read content groups.
    ReadContentGroups,
    /// Create and edit content groups.
    WriteContentGroups,
    /// Read tags.
    ReadTags,
    /// Create and edit tags.
    WriteTags,
    /// Read workspace details.
    ReadWorkspace,
    /// Read webhooks.
    ReadWebhooks,
    /// Create and edit webhooks.
    WriteWebhooks,
    /// Read content variants.
    ReadVariants,
    /// Create and edit content variants.
    WriteVariants,
}

impl TokenPermission {
    /// Every token permission.
    pub const ALL: [Self; 11] = [
        Self::ReadContent,
        Self::WriteContent,
        Self::ReadContentGroups,
        Self::WriteContentGroups,
        Self::ReadTags,
        Self::WriteTags,
        Self::ReadWorkspace,
        Self::ReadWebhooks,
        Self::WriteWebhooks,
        Self::ReadVariants,
        Self::WriteVariants,
    ];

    /// Wire name of the permission.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadContent => "readContent",
            Self::WriteContent => "writeContent",
            Self::ReadContentGroups => "readContentGroups",
            Self::WriteContentGroups => "writeContentGroups",
            Self::ReadTags => "readTags",
            Self::WriteTags => "writeTags",
            Self::ReadWorkspace => "readWorkspace",
            Self::ReadWebhooks => "readWebhooks",
            Self::WriteWebhooks => "writeWebhooks",
            Self::ReadVariants => "readVariants",
            Self::WriteVariants => "writeVariants",
        }
    }
}

impl fmt::Display for TokenPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenPermission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission {
                vocabulary: "token",
                name: s.to_string(),
            })
    }
}
