//! Mock implementations for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use folio_core::{Identity, IdentityResolver, RawRequest, ResolveError, ResolveResult, RpcError};
use folio_guard::{ExecutionContext, OperationHandler};

/// Mock implementation of [`IdentityResolver`].
///
/// Queued responses are returned first, in order. Once the queue is empty
/// the static response is returned, or an error in failing mode.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityResolver {
    queued: Arc<Mutex<VecDeque<ResolveResult<Option<Identity>>>>>,
    fallback: Option<Identity>,
    failing: bool,
    calls: Arc<AtomicUsize>,
}

impl MockIdentityResolver {
    /// Resolver that never finds a credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that always returns `identity`.
    #[must_use]
    pub fn returning(identity: Identity) -> Self {
        Self {
            fallback: Some(identity),
            ..Self::default()
        }
    }

    /// Resolver whose lookups always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Queue a one-shot response.
    #[must_use]
    pub fn with_response(self, response: ResolveResult<Option<Identity>>) -> Self {
        if let Ok(mut guard) = self.queued.lock() {
            guard.push_back(response);
        }
        self
    }

    /// Number of resolve calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wrap in an Arc for sharing with a router.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl IdentityResolver for MockIdentityResolver {
    async fn resolve(&self, _request: &RawRequest) -> ResolveResult<Option<Identity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(response) = self.queued.lock().ok().and_then(|mut q| q.pop_front()) {
            return response;
        }
        if self.failing {
            return Err(ResolveError::Lookup("mock resolver unavailable".to_string()));
        }
        Ok(self.fallback.clone())
    }
}

/// Handler that records every context it receives.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    received: Arc<Mutex<Vec<(ExecutionContext, Value)>>>,
    response: Result<Value, RpcError>,
}

impl RecordingHandler {
    /// Handler that answers `null`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            response: Ok(Value::Null),
        }
    }

    /// Answer every call with `value`.
    #[must_use]
    pub fn with_response(mut self, value: Value) -> Self {
        self.response = Ok(value);
        self
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn with_error(mut self, error: RpcError) -> Self {
        self.response = Err(error);
        self
    }

    /// Contexts received so far.
    #[must_use]
    pub fn contexts(&self) -> Vec<ExecutionContext> {
        self.received
            .lock()
            .map(|g| g.iter().map(|(ctx, _)| ctx.clone()).collect())
            .unwrap_or_default()
    }

    /// Inputs received so far.
    #[must_use]
    pub fn inputs(&self) -> Vec<Value> {
        self.received
            .lock()
            .map(|g| g.iter().map(|(_, input)| input.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of calls handled.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.received.lock().map(|g| g.len()).unwrap_or_default()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperationHandler for RecordingHandler {
    async fn handle(&self, ctx: ExecutionContext, input: Value) -> Result<Value, RpcError> {
        if let Ok(mut guard) = self.received.lock() {
            guard.push((ctx, input));
        }
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_admin_session, test_execution_context, test_token};
    use folio_core::TokenPermission;

    #[tokio::test]
    async fn test_queued_then_static() {
        let resolver = MockIdentityResolver::returning(test_admin_session())
            .with_response(Ok(Some(test_token([TokenPermission::ReadTags]))))
            .with_response(Err(ResolveError::MalformedCredential("bad".into())));
        let request = RawRequest::new();

        let first = resolver.resolve(&request).await.unwrap().unwrap();
        assert_eq!(first.kind(), "token");
        assert!(resolver.resolve(&request).await.is_err());
        let third = resolver.resolve(&request).await.unwrap().unwrap();
        assert_eq!(third.kind(), "session");
        assert_eq!(resolver.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let resolver = MockIdentityResolver::failing();
        assert!(resolver.resolve(&RawRequest::new()).await.is_err());
        let empty = MockIdentityResolver::new();
        assert!(empty.resolve(&RawRequest::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recording_handler() {
        let handler = RecordingHandler::new().with_response(Value::Bool(true));
        let ctx = test_execution_context("tags.list");

        let out = handler.handle(ctx, Value::from(7)).await.unwrap();
        assert_eq!(out, Value::Bool(true));
        assert_eq!(handler.call_count(), 1);
        assert_eq!(handler.inputs(), vec![Value::from(7)]);
        assert!(handler.contexts()[0].auth().is_none());
    }
}
