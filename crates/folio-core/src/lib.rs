//! Folio Core - Foundation types for the Folio request authorization pipeline.
//!
//! This crate provides:
//! - Document identifiers ([`ObjectId`], [`UserId`], [`WorkspaceId`])
//! - The two disjoint permission vocabularies ([`SessionPermission`], [`TokenPermission`])
//! - Resolved caller identities and the [`IdentityResolver`] seam
//! - The verified [`AuthContext`] injected into handler execution contexts
//! - The classified error taxonomy and the RPC error envelope
//!
//! # Example
//!
//! ```
//! use folio_core::{Identity, SessionIdentity, SessionPermission};
//!
//! let session = SessionIdentity::new("5f1d7c3e9a1b2c3d4e5f6a7b", "5f1d7c3e9a1b2c3d4e5f6a7c")
//!     .with_permissions([SessionPermission::ReadContent]);
//! let identity = Identity::Session(session);
//!
//! assert_eq!(identity.kind(), "session");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod auth;
pub mod error;
pub mod id;
pub mod identity;
pub mod permission;

pub use auth::AuthContext;
pub use error::{
    AuthError, AuthResult, ErrorCause, ErrorData, ErrorEnvelope, ErrorKind, RpcError,
};
pub use id::{IdParseError, ObjectId, UserId, WorkspaceId};
pub use identity::{
    BaseType, Identity, IdentityResolver, InMemoryIdentityResolver, RawRequest, ResolveError,
    ResolveResult, SESSION_COOKIE, SessionIdentity, TokenIdentity,
};
pub use permission::{SessionPermission, TokenPermission, UnknownPermission};
