//! Folio Telemetry - Logging and request correlation.
//!
//! This crate provides:
//! - Configurable logging setup with multiple formats and targets
//! - Per-call request context for correlating guard decisions and handler work
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_telemetry::{LogConfig, LogFormat, setup_logging, RequestContext};
//!
//! # fn main() -> Result<(), folio_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Json)
//!     .with_directive("folio_guard=debug");
//!
//! setup_logging(&config)?;
//!
//! let ctx = RequestContext::new("rpc").with_operation("contentPieces.list");
//! let span = ctx.span();
//! let _guard = span.enter();
//! tracing::info!("handling call");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod error;
mod logging;

pub use context::{RequestContext, RequestGuard};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
