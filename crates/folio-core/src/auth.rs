//! Verified identity data injected into the handler's execution context.

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};
use crate::id::{UserId, WorkspaceId};

/// The verified caller of one operation invocation.
///
/// Built once by the authorization guard and never mutated afterwards.
/// `workspace_id` is present when the guard ran in workspace-bound mode or
/// the caller presented an API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    /// The calling user.
    pub user_id: UserId,
    /// The workspace the call is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<WorkspaceId>,
}

impl AuthContext {
    /// Context for a workspace-independent call.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            workspace_id: None,
        }
    }

    /// Context scoped to a workspace.
    #[must_use]
    pub const fn workspace(user_id: UserId, workspace_id: WorkspaceId) -> Self {
        Self {
            user_id,
            workspace_id: Some(workspace_id),
        }
    }

    /// Whether a workspace identifier is present.
    #[must_use]
    pub const fn is_workspace_bound(&self) -> bool {
        self.workspace_id.is_some()
    }

    /// The workspace identifier, failing when the context is user-bound.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::BadRequest`] with the workspace cause when no
    /// workspace was resolved for this call.
    pub fn require_workspace(&self) -> AuthResult<WorkspaceId> {
        self.workspace_id.ok_or_else(AuthError::workspace_error)
    }
}
