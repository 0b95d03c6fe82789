//! Prelude module - commonly used types for convenient import.
//!
//! Use `use folio_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{AuthError, AuthResult, ErrorCause, ErrorEnvelope, ErrorKind, RpcError};

// Identifiers
pub use crate::{ObjectId, UserId, WorkspaceId};

// Identities
pub use crate::{
    BaseType, Identity, IdentityResolver, RawRequest, ResolveError, SessionIdentity,
    TokenIdentity,
};

// Permissions and verified context
pub use crate::{AuthContext, SessionPermission, TokenPermission};
