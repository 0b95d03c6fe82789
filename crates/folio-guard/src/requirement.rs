//! Static authorization metadata attached to operations.

use std::collections::BTreeSet;
use std::fmt;

use folio_config::ConfigFlag;
use folio_core::{SessionPermission, TokenPermission};
use serde::{Deserialize, Serialize};

use crate::error::{RegistrationError, RegistrationResult};

/// Which authorization guard, if any, runs in front of an operation.
///
/// This is the call-site mode: it decides at runtime whether the guard asks
/// for a workspace. The declared [`OperationRequirement::workspace_bound`]
/// must agree with it, which the router checks at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Protection {
    /// No identity required.
    Public,
    /// Identity required; the handler receives a workspace.
    Workspace,
    /// Identity required; workspace-independent (e.g. listing a user's
    /// own workspaces).
    User,
}

impl Protection {
    /// Whether the guard runs in workspace-bound mode.
    #[must_use]
    pub const fn is_workspace_bound(&self) -> bool {
        matches!(self, Self::Workspace)
    }

    /// Whether an identity is required at all.
    #[must_use]
    pub const fn requires_identity(&self) -> bool {
        !matches!(self, Self::Public)
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Workspace => write!(f, "workspace"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Preconditions declared for one operation at registration time.
///
/// The two permission sets are typed by vocabulary, so a token permission
/// can never appear in the session set or vice versa.
///
/// # Example
///
/// ```
/// use folio_config::ConfigFlag;
/// use folio_core::{SessionPermission, TokenPermission};
/// use folio_guard::OperationRequirement;
///
/// let requirement = OperationRequirement::workspace()
///     .session([SessionPermission::WriteContent])
///     .token([TokenPermission::WriteContent])
///     .config([ConfigFlag::Search]);
///
/// assert!(requirement.workspace_bound);
/// assert!(requirement.requires_config());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequirement {
    /// Permissions a non-admin session must hold.
    pub session_permissions: BTreeSet<SessionPermission>,
    /// Permissions an API token must hold.
    pub token_permissions: BTreeSet<TokenPermission>,
    /// Whether the operation acts within one workspace.
    pub workspace_bound: bool,
    /// Deployment capabilities the operation needs.
    pub required_config: BTreeSet<ConfigFlag>,
}

impl OperationRequirement {
    /// Requirement for a workspace-bound operation.
    #[must_use]
    pub fn workspace() -> Self {
        Self {
            workspace_bound: true,
            ..Self::default()
        }
    }

    /// Requirement for a workspace-independent operation.
    #[must_use]
    pub fn user() -> Self {
        Self::default()
    }

    /// Add required session permissions.
    #[must_use]
    pub fn session(mut self, permissions: impl IntoIterator<Item = SessionPermission>) -> Self {
        self.session_permissions.extend(permissions);
        self
    }

    /// Add required token permissions.
    #[must_use]
    pub fn token(mut self, permissions: impl IntoIterator<Item = TokenPermission>) -> Self {
        self.token_permissions.extend(permissions);
        self
    }

    /// Add required capability flags.
    #[must_use]
    pub fn config(mut self, flags: impl IntoIterator<Item = ConfigFlag>) -> Self {
        self.required_config.extend(flags);
        self
    }

    /// Whether any permission is declared.
    #[must_use]
    pub fn declares_permissions(&self) -> bool {
        !self.session_permissions.is_empty() || !self.token_permissions.is_empty()
    }

    /// Whether any capability flag is declared.
    #[must_use]
    pub fn requires_config(&self) -> bool {
        !self.required_config.is_empty()
    }
}

/// Static description of one registered operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMeta {
    /// Dotted operation path (e.g. `contentPieces.update`).
    pub path: String,
    /// Call-site guard mode.
    pub protection: Protection,
    /// Declared preconditions.
    pub requirement: OperationRequirement,
}

impl OperationMeta {
    /// Create operation metadata.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        protection: Protection,
        requirement: OperationRequirement,
    ) -> Self {
        Self {
            path: path.into(),
            protection,
            requirement,
        }
    }

    /// Check that the declaration is internally consistent.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::EmptyPath`] for an empty path
    /// - [`RegistrationError::PublicWithPermissions`] when a public
    ///   operation declares permissions
    /// - [`RegistrationError::WorkspaceModeMismatch`] when the protection and
    ///   `workspace_bound` disagree
    pub fn validate(&self) -> RegistrationResult<()> {
        if self.path.trim().is_empty() {
            return Err(RegistrationError::EmptyPath);
        }

        match self.protection {
            Protection::Public => {
                if self.requirement.declares_permissions() {
                    return Err(RegistrationError::PublicWithPermissions {
                        path: self.path.clone(),
                    });
                }
            },
            Protection::Workspace | Protection::User => {
                if self.protection.is_workspace_bound() != self.requirement.workspace_bound {
                    return Err(RegistrationError::WorkspaceModeMismatch {
                        path: self.path.clone(),
                        protection: self.protection,
                        declared: self.requirement.workspace_bound,
                    });
                }
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let requirement = OperationRequirement::user()
            .session([SessionPermission::ManageTokens, SessionPermission::ManageTokens])
            .token([TokenPermission::ReadWorkspace]);

        assert!(!requirement.workspace_bound);
        assert_eq!(requirement.session_permissions.len(), 1);
        assert!(requirement.declares_permissions());
        assert!(!requirement.requires_config());

        assert!(!OperationRequirement::workspace().declares_permissions());
    }

    #[test]
    fn test_protection_modes() {
        assert!(Protection::Workspace.is_workspace_bound());
        assert!(!Protection::User.is_workspace_bound());
        assert!(Protection::User.requires_identity());
        assert!(!Protection::Public.requires_identity());
        assert_eq!(Protection::Workspace.to_string(), "workspace");
    }

    #[test]
    fn test_requirement_serialization() {
        let requirement = OperationRequirement::workspace()
            .session([SessionPermission::ReadContent])
            .config([ConfigFlag::GithubApp]);
        let json = serde_json::to_value(&requirement).unwrap();

        assert_eq!(json["sessionPermissions"][0], "readContent");
        assert_eq!(json["requiredConfig"][0], "github_app");
        assert_eq!(json["workspaceBound"], true);
    }

    #[test]
    fn test_meta_validation() {
        let ok = OperationMeta::new(
            "contentPieces.update",
            Protection::Workspace,
            OperationRequirement::workspace().session([SessionPermission::EditMetadata]),
        );
        assert!(ok.validate().is_ok());

        let public_config = OperationMeta::new(
            "billing.plans",
            Protection::Public,
            OperationRequirement::user().config([ConfigFlag::Billing]),
        );
        assert!(public_config.validate().is_ok());

        let empty = OperationMeta::new(" ", Protection::User, OperationRequirement::user());
        assert_eq!(empty.validate(), Err(RegistrationError::EmptyPath));
    }

    #[test]
    fn test_meta_mode_mismatch() {
        let meta = OperationMeta::new(
            "workspaces.list",
            Protection::User,
            OperationRequirement::workspace(),
        );
        assert_eq!(
            meta.validate(),
            Err(RegistrationError::WorkspaceModeMismatch {
                path: "workspaces.list".to_owned(),
                protection: Protection::User,
                declared: true,
            })
        );

        let meta = OperationMeta::new("tags.list", Protection::Workspace, OperationRequirement::user());
        assert!(matches!(
            meta.validate(),
            Err(RegistrationError::WorkspaceModeMismatch { declared: false, .. })
        ));
    }

    #[test]
    fn test_public_with_permissions_rejected() {
        let meta = OperationMeta::new(
            "auth.signIn",
            Protection::Public,
            OperationRequirement::user().token([TokenPermission::ReadContent]),
        );
        assert!(matches!(
            meta.validate(),
            Err(RegistrationError::PublicWithPermissions { .. })
        ));
    }
}
