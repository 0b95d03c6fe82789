//! Per-call execution context handed to operation handlers.

use folio_core::{AuthContext, RpcError};
use folio_telemetry::RequestContext;
use serde::Serialize;

/// Everything a handler learns about the call besides its input.
///
/// Starts as a bare [`RequestContext`]; the guard chain extends it with the
/// verified [`AuthContext`] under the `auth` key. Public operations never
/// receive one.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionContext {
    #[serde(skip)]
    request: RequestContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<AuthContext>,
}

impl ExecutionContext {
    /// Context with no verified caller.
    #[must_use]
    pub fn new(request: RequestContext) -> Self {
        Self {
            request,
            auth: None,
        }
    }

    /// Attach the verified caller.
    #[must_use]
    pub fn extend_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Correlation data for the call.
    #[must_use]
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// The operation path, if known.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.request.operation.as_deref()
    }

    /// The verified caller, if the operation is protected.
    #[must_use]
    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    /// The verified caller, failing for unguarded calls.
    ///
    /// # Errors
    ///
    /// Returns an internal [`RpcError`] when no guard ran for this call,
    /// which means the handler was registered under the wrong protection.
    pub fn require_auth(&self) -> Result<&AuthContext, RpcError> {
        self.auth
            .as_ref()
            .ok_or_else(|| RpcError::internal("operation ran without an authorization guard"))
    }
}
