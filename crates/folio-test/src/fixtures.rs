//! Test fixtures for common types.

use folio_guard::ExecutionContext;
use folio_telemetry::RequestContext;

use folio_core::{
    BaseType, Identity, ObjectId, SessionIdentity, SessionPermission, TokenIdentity,
    TokenPermission,
};

/// User identifier shared by the identity fixtures.
pub const TEST_USER_ID: &str = "5f1d7c3e9a1b2c3d4e5f6a7b";

/// Workspace identifier shared by the identity fixtures.
pub const TEST_WORKSPACE_ID: &str = "5f1d7c3e9a1b2c3d4e5f6a7c";

/// Create a random object identifier.
#[must_use]
pub fn test_object_id() -> ObjectId {
    ObjectId::new()
}

/// Create an ordinary session holding `permissions`.
#[must_use]
pub fn test_session(permissions: impl IntoIterator<Item = SessionPermission>) -> Identity {
    Identity::Session(
        SessionIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID).with_permissions(permissions),
    )
}

/// Create an admin session with no explicit permissions.
#[must_use]
pub fn test_admin_session() -> Identity {
    Identity::Session(
        SessionIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID).with_base_type(BaseType::Admin),
    )
}

/// Create an API token holding `permissions`.
#[must_use]
pub fn test_token(permissions: impl IntoIterator<Item = TokenPermission>) -> Identity {
    Identity::Token(
        TokenIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID).with_permissions(permissions),
    )
}

/// Create a session whose workspace identifier is not an object id.
#[must_use]
pub fn test_session_with_bad_workspace() -> Identity {
    Identity::Session(SessionIdentity::new(TEST_USER_ID, "not-an-object-id"))
}

/// Create an unguarded execution context for `operation`.
#[must_use]
pub fn test_execution_context(operation: &str) -> ExecutionContext {
    ExecutionContext::new(RequestContext::new("test").with_operation(operation))
}
