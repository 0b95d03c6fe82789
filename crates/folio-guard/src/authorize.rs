//! Authorization guard: turns a resolved identity into an [`AuthContext`].
//!
//! # Check Order
//!
//! 1. No identity -> `Unauthorized`
//! 2. Session
//!    - admin base type -> permission check skipped
//!    - otherwise every required session permission must be held -> else `Forbidden`
//!    - user id (and workspace id when workspace-bound) parsed -> else
//!      `BadRequest(workspaceError)`
//! 3. Token
//!    - every required token permission must be held -> else `Forbidden`
//!    - user and workspace ids parsed, the workspace is always returned

use std::str::FromStr;

use folio_core::{
    AuthContext, AuthError, AuthResult, Identity, SessionIdentity, TokenIdentity, UserId,
    WorkspaceId,
};
use tracing::debug;

use crate::requirement::OperationRequirement;

/// Check `identity` against `requirement`.
///
/// `workspace_bound` is the call-site mode. Token identities are scoped to
/// one workspace at issuance, so their context always carries it.
///
/// # Errors
///
/// - [`AuthError::Unauthorized`] when `identity` is `None`
/// - [`AuthError::Forbidden`] when a required permission is missing
/// - [`AuthError::BadRequest`] when an identifier is malformed
pub fn authorize(
    identity: Option<&Identity>,
    requirement: &OperationRequirement,
    workspace_bound: bool,
) -> AuthResult<AuthContext> {
    match identity {
        None => Err(AuthError::Unauthorized),
        Some(Identity::Session(session)) => authorize_session(session, requirement, workspace_bound),
        Some(Identity::Token(token)) => authorize_token(token, requirement),
    }
}

/// Workspace-bound entry point, used by most operations.
///
/// # Errors
///
/// See [`authorize`].
pub fn authorize_workspace(
    identity: Option<&Identity>,
    requirement: &OperationRequirement,
) -> AuthResult<AuthContext> {
    authorize(identity, requirement, true)
}

/// User-bound entry point for workspace-independent operations.
///
/// # Errors
///
/// See [`authorize`].
pub fn authorize_user(
    identity: Option<&Identity>,
    requirement: &OperationRequirement,
) -> AuthResult<AuthContext> {
    authorize(identity, requirement, false)
}

fn authorize_session(
    session: &SessionIdentity,
    requirement: &OperationRequirement,
    workspace_bound: bool,
) -> AuthResult<AuthContext> {
    if !session.base_type.is_admin() {
        if let Some(missing) = requirement
            .session_permissions
            .iter()
            .find(|p| !session.has_permission(**p))
        {
            debug!(permission = %missing, "session lacks required permission");
            return Err(AuthError::Forbidden);
        }
    }

    let user_id: UserId = parse_id(&session.user_id)?;
    if workspace_bound {
        let workspace_id: WorkspaceId = parse_id(&session.workspace_id)?;
        Ok(AuthContext::workspace(user_id, workspace_id))
    } else {
        Ok(AuthContext::user(user_id))
    }
}

fn authorize_token(
    token: &TokenIdentity,
    requirement: &OperationRequirement,
) -> AuthResult<AuthContext> {
    if let Some(missing) = requirement
        .token_permissions
        .iter()
        .find(|p| !token.has_permission(**p))
    {
        debug!(permission = %missing, "token lacks required permission");
        return Err(AuthError::Forbidden);
    }

    let user_id: UserId = parse_id(&token.user_id)?;
    let workspace_id: WorkspaceId = parse_id(&token.workspace_id)?;
    Ok(AuthContext::workspace(user_id, workspace_id))
}

fn parse_id<T: FromStr>(raw: &str) -> AuthResult<T> {
    raw.parse().map_err(|_| {
        debug!(len = raw.len(), "credential carries a malformed identifier");
        AuthError::workspace_error()
    })
}
