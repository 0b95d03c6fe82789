//! Shared harness for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use folio_config::{ConfigFlag, ConfigFlags};
use folio_core::{
    IdentityResolver, InMemoryIdentityResolver, RawRequest, SESSION_COOKIE, SessionIdentity,
    SessionPermission, TokenIdentity, TokenPermission,
};
use folio_guard::{Operation, OperationRequirement, Router};
use folio_test::{RecordingHandler, TEST_USER_ID, TEST_WORKSPACE_ID};

/// Session cookie of an editor holding `readContent`.
pub const READER_SESSION: &str = "reader-session";
/// Session cookie of an admin with no explicit permissions.
pub const ADMIN_SESSION: &str = "admin-session";
/// Bearer secret of a token holding `readContent` and `writeContent`.
pub const CONTENT_TOKEN: &str = "content-token";

/// A router with a small operation catalog and one recording handler per
/// operation.
pub struct PipelineHarness {
    /// The router under test.
    pub router: Router,
    /// Handler behind `contentPieces.list`.
    pub list: RecordingHandler,
    /// Handler behind `contentPieces.update`.
    pub update: RecordingHandler,
    /// Handler behind `workspaces.list`.
    pub workspaces: RecordingHandler,
    /// Handler behind `search.query`.
    pub search: RecordingHandler,
    /// Handler behind `auth.status`.
    pub status: RecordingHandler,
}

impl PipelineHarness {
    /// Harness backed by the standard in-memory identities.
    pub fn new(flags: ConfigFlags) -> Self {
        Self::with_resolver(standard_resolver(), flags)
    }

    /// Harness backed by a custom resolver.
    pub fn with_resolver(resolver: Arc<dyn IdentityResolver>, flags: ConfigFlags) -> Self {
        let list = RecordingHandler::new();
        let update = RecordingHandler::new();
        let workspaces = RecordingHandler::new();
        let search = RecordingHandler::new();
        let status = RecordingHandler::new();

        let mut router = Router::new(resolver, flags);
        router
            .register(Operation::workspace(
                "contentPieces.list",
                OperationRequirement::workspace()
                    .session([SessionPermission::ReadContent])
                    .token([TokenPermission::ReadContent]),
                list.clone(),
            ))
            .unwrap()
            .register(Operation::workspace(
                "contentPieces.update",
                OperationRequirement::workspace()
                    .session([SessionPermission::ReadContent, SessionPermission::WriteContent])
                    .token([TokenPermission::ReadContent]),
                update.clone(),
            ))
            .unwrap()
            .register(Operation::user(
                "workspaces.list",
                OperationRequirement::user(),
                workspaces.clone(),
            ))
            .unwrap()
            .register(
                Operation::workspace(
                    "search.query",
                    OperationRequirement::workspace().token([TokenPermission::ReadContent]),
                    search.clone(),
                )
                .with_config([ConfigFlag::Search]),
            )
            .unwrap()
            .register(Operation::public("auth.status", status.clone()))
            .unwrap();

        Self {
            router,
            list,
            update,
            workspaces,
            search,
            status,
        }
    }
}

/// Resolver holding the sessions and tokens named by the constants above.
pub fn standard_resolver() -> Arc<InMemoryIdentityResolver> {
    let resolver = InMemoryIdentityResolver::new();
    resolver
        .insert_session(
            READER_SESSION,
            SessionIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID)
                .with_permissions([SessionPermission::ReadContent]),
        )
        .unwrap();
    resolver
        .insert_session(
            ADMIN_SESSION,
            SessionIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID)
                .with_base_type(folio_core::BaseType::Admin),
        )
        .unwrap();
    resolver
        .insert_token(
            CONTENT_TOKEN,
            TokenIdentity::new(TEST_USER_ID, TEST_WORKSPACE_ID)
                .with_permissions([TokenPermission::ReadContent, TokenPermission::WriteContent]),
        )
        .unwrap();
    resolver.shared()
}

/// Request carrying a session cookie.
pub fn session_request(access_token: &str) -> RawRequest {
    RawRequest::new().with_cookie(SESSION_COOKIE, access_token)
}

/// Request carrying a bearer token.
pub fn token_request(secret: &str) -> RawRequest {
    RawRequest::new().with_bearer(secret)
}
