//! Folio Guard - Capability and authorization guards for API operations.
//!
//! Every operation declares an [`OperationRequirement`] when it is
//! registered. At call time the [`Router`] runs the [`GuardChain`]:
//!
//! ```text
//! call ─► capability guard ─► identity resolution ─► authorization guard ─► handler
//!            (ServerError)       (protected only)     (Unauthorized /
//!                                                      Forbidden /
//!                                                      BadRequest)
//! ```
//!
//! The authorization guard is a pure function of the resolved identity and
//! the requirement; see [`authorize`]. On success the handler's
//! [`ExecutionContext`] carries the verified [`folio_core::AuthContext`].
//!
//! # Example
//!
//! ```
//! use folio_config::ConfigFlags;
//! use folio_core::{InMemoryIdentityResolver, RpcError, SessionPermission};
//! use folio_guard::{ExecutionContext, Operation, OperationRequirement, Router, handler_fn};
//! use serde_json::{Value, json};
//!
//! let mut router = Router::new(InMemoryIdentityResolver::new().shared(), ConfigFlags::none());
//! router
//!     .register(Operation::workspace(
//!         "contentPieces.update",
//!         OperationRequirement::workspace().session([SessionPermission::WriteContent]),
//!         handler_fn(|ctx: ExecutionContext, _input: Value| async move {
//!             let auth = ctx.require_auth()?;
//!             Ok::<_, RpcError>(json!({ "workspace": auth.workspace_id }))
//!         }),
//!     ))
//!     .unwrap();
//!
//! assert_eq!(router.operations().count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod authorize;
mod capability;
mod chain;
mod context;
mod error;
mod requirement;
mod router;

pub use authorize::{authorize, authorize_user, authorize_workspace};
pub use capability::check_capabilities;
pub use chain::GuardChain;
pub use context::ExecutionContext;
pub use error::{RegistrationError, RegistrationResult};
pub use requirement::{OperationMeta, OperationRequirement, Protection};
pub use router::{FnHandler, Operation, OperationHandler, Router, handler_fn};
