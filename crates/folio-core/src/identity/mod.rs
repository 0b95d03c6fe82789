//! # Caller Identity
//!
//! Every API call is made either by an interactive **session** (a user
//! logged into the dashboard) or by a long-lived **API token**. The two
//! credential kinds carry different trust levels:
//!
//! - Sessions carry a [`BaseType`] and a set of [`SessionPermission`]s.
//!   An admin session implicitly satisfies every session permission.
//! - Tokens carry a set of [`TokenPermission`]s and are scoped to exactly
//!   one workspace at issuance.
//!
//! [`Identity`] is the tagged union of the two. Exactly one variant is
//! active for a resolved caller, and the tag decides which vocabulary the
//! authorization guard checks.
//!
//! Turning cookies and headers into an [`Identity`] is the job of an
//! [`IdentityResolver`]. This crate only defines the seam plus an
//! [`InMemoryIdentityResolver`] for tests and simple deployments.
//!
//! [`SessionPermission`]: crate::SessionPermission
//! [`TokenPermission`]: crate::TokenPermission

mod error;
mod resolver;
mod types;

pub use error::{ResolveError, ResolveResult};
pub use resolver::{
    IdentityResolver, InMemoryIdentityResolver, RawRequest, SESSION_COOKIE,
};
pub use types::{BaseType, Identity, SessionIdentity, TokenIdentity};
