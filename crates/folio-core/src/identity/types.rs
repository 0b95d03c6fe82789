use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::permission::{SessionPermission, TokenPermission};

/// Base role of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseType {
    /// Ordinary workspace member, checked permission by permission.
    #[default]
    Member,
    /// Workspace administrator.
    Admin,
}

impl BaseType {
    /// Whether this is the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Identity data attached to an interactive session.
///
/// Identifiers are kept in the textual form the resolver read them in;
/// the authorization guard parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    /// User the session belongs to.
    pub user_id: String,
    /// Workspace currently selected in the session.
    pub workspace_id: String,
    /// Base role.
    #[serde(default)]
    pub base_type: BaseType,
    /// Permissions granted in the selected workspace.
    #[serde(default)]
    pub permissions: HashSet<SessionPermission>,
}

impl SessionIdentity {
    /// Create an ordinary session with no permissions.
    #[must_use]
    pub fn new(user_id: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            workspace_id: workspace_id.into(),
            base_type: BaseType::Member,
            permissions: HashSet::new(),
        }
    }

    /// Set the base role.
    #[must_use]
    pub fn with_base_type(mut self, base_type: BaseType) -> Self {
        self.base_type = base_type;
        self
    }

    /// Grant permissions.
    #[must_use]
    pub fn with_permissions(
        mut self,
        permissions: impl IntoIterator<Item = SessionPermission>,
    ) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Whether the session holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: SessionPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Identity data attached to an API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdentity {
    /// User that issued the token.
    pub user_id: String,
    /// Workspace the token is scoped to.
    pub workspace_id: String,
    /// Permissions granted to the token.
    #[serde(default)]
    pub permissions: HashSet<TokenPermission>,
}

impl TokenIdentity {
    /// Create a token identity with no permissions.
    #[must_use]
    pub fn new(user_id: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            workspace_id: workspace_id.into(),
            permissions: HashSet::new(),
        }
    }

    /// Grant permissions.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = TokenPermission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Whether the token holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: TokenPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// A resolved caller: either a session or an API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Identity {
    /// Interactive session.
    Session(SessionIdentity),
    /// Long-lived API token.
    Token(TokenIdentity),
}

impl Identity {
    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Token(_) => "token",
        }
    }

    /// Raw user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Session(s) => &s.user_id,
            Self::Token(t) => &t.user_id,
        }
    }
}

impl From<SessionIdentity> for Identity {
    fn from(session: SessionIdentity) -> Self {
        Self::Session(session)
    }
}

impl From<TokenIdentity> for Identity {
    fn from(token: TokenIdentity) -> Self {
        Self::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_builder() {
        let session = SessionIdentity::new("u", "w")
            .with_base_type(BaseType::Admin)
            .with_permissions([SessionPermission::ReadContent]);

        assert!(session.base_type.is_admin());
        assert!(session.has_permission(SessionPermission::ReadContent));
        assert!(!session.has_permission(SessionPermission::WriteContent));
    }

    #[test]
    fn test_identity_tagged_serialization() {
        let identity = Identity::from(
            TokenIdentity::new("u", "w").with_permissions([TokenPermission::ReadContent]),
        );
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["type"], "token");
        assert_eq!(json["data"]["workspaceId"], "w");
        assert_eq!(json["data"]["permissions"][0], "readContent");

        let back: Identity = serde_json::from_value(json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn test_session_defaults_on_deserialize() {
        let json = serde_json::json!({
            "type": "session",
            "data": { "userId": "u", "workspaceId": "w" }
        });
        let identity: Identity = serde_json::from_value(json).unwrap();
        let Identity::Session(session) = identity else {
            panic!("expected session");
        };
        assert_eq!(session.base_type, BaseType::Member);
        assert!(session.permissions.is_empty());
    }
}
