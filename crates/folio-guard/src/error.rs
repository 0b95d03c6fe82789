//! Guard error types.

use thiserror::Error;

use crate::requirement::Protection;

/// Errors raised while registering operations with a router.
///
/// These are programming errors surfaced at startup, never at call time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The operation path is empty.
    #[error("operation path must not be empty")]
    EmptyPath,

    /// Another operation is already registered at this path.
    #[error("operation already registered: {0}")]
    DuplicatePath(String),

    /// The call-site protection disagrees with the declared requirement.
    #[error(
        "operation '{path}' is registered as {protection} but declares workspace_bound = {declared}"
    )]
    WorkspaceModeMismatch {
        /// Operation path.
        path: String,
        /// Call-site protection.
        protection: Protection,
        /// Declared `workspace_bound` value.
        declared: bool,
    },

    /// A public operation declares permissions no guard would check.
    #[error("public operation '{path}' declares permissions")]
    PublicWithPermissions {
        /// Operation path.
        path: String,
    },
}

/// Result type for registration.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
