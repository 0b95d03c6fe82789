//! Prelude module - commonly used test utilities.
//!
//! Use `use folio_test::prelude::*;` to import all essential types.

pub use crate::{MockIdentityResolver, RecordingHandler};
pub use crate::{setup_test_logging, setup_test_logging_default};
pub use crate::{
    TEST_USER_ID, TEST_WORKSPACE_ID, test_admin_session, test_execution_context,
    test_object_id, test_session, test_token,
};
