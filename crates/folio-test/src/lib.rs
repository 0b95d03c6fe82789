//! Folio Test - Shared test utilities for the Folio authorization pipeline.
//!
//! This crate provides identity fixtures, mock resolvers and handlers that
//! can be used across Folio crates as a dev-dependency.
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_core::SessionPermission;
//! use folio_guard::{Operation, OperationRequirement, Router};
//! use folio_test::{MockIdentityResolver, RecordingHandler, test_session};
//!
//! #[tokio::test]
//! async fn test_editor_can_update() {
//!     let resolver = MockIdentityResolver::returning(test_session([SessionPermission::WriteContent]));
//!     let handler = RecordingHandler::new();
//!     let mut router = Router::new(resolver.shared(), Default::default());
//!     router.register(Operation::workspace(
//!         "contentPieces.update",
//!         OperationRequirement::workspace().session([SessionPermission::WriteContent]),
//!         handler.clone(),
//!     )).unwrap();
//!     // ...
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
