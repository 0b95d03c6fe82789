//! Prelude module - commonly used types for convenient import.
//!
//! Use `use folio_guard::prelude::*;` to import all essential types.

// Declaring operations
pub use crate::{Operation, OperationHandler, OperationRequirement, Protection, handler_fn};

// Dispatch
pub use crate::{ExecutionContext, RegistrationError, Router};

// Guards
pub use crate::{authorize, check_capabilities};
