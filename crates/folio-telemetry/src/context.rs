//! Per-call request context for correlation and tracing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Correlation data for one API call.
///
/// Created when a call enters the server and dropped when it completes.
/// The span returned by [`RequestContext::span`] declares `user_id` and
/// `workspace_id` fields that stay empty until the caller is verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Unique request identifier.
    pub request_id: Uuid,
    /// Correlation ID shared with upstream callers.
    pub correlation_id: Uuid,
    /// When the request started.
    pub started_at: DateTime<Utc>,
    /// Component that accepted the call.
    pub source: String,
    /// Operation path being invoked.
    pub operation: Option<String>,
    /// Additional metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create a new request context.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        Self {
            request_id: id,
            correlation_id: id,
            started_at: Utc::now(),
            source: source.into(),
            operation: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the correlation ID.
    #[must_use]
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = id;
        self
    }

    /// Set the operation path.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Add metadata.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Milliseconds since the request started.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_milliseconds()
    }

    /// Create a tracing span with this context.
    #[must_use]
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            correlation_id = %self.correlation_id,
            source = %self.source,
            operation = self.operation.as_deref(),
            user_id = tracing::field::Empty,
            workspace_id = tracing::field::Empty,
        )
    }

    /// Short identifier for log lines.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.request_id.simple().to_string()[..8].to_string()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("unknown")
    }
}

/// Owns the span of one call and logs its completion on drop.
///
/// The span is not entered by the guard. Async callers attach it with
/// `tracing::Instrument`; sync callers enter it via [`RequestGuard::span`].
pub struct RequestGuard {
    context: RequestContext,
    span: tracing::Span,
}

impl RequestGuard {
    /// Open the span of `context`.
    #[must_use]
    pub fn new(context: RequestContext) -> Self {
        let span = context.span();
        span.in_scope(|| tracing::debug!("request started"));
        Self { context, span }
    }

    /// Get the request context.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// The request span.
    #[must_use]
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Record the verified caller on the request span.
    pub fn record_caller(&self, user_id: &str, workspace_id: Option<&str>) {
        self.span.record("user_id", user_id);
        if let Some(workspace_id) = workspace_id {
            self.span.record("workspace_id", workspace_id);
        }
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.context.elapsed_ms();
        self.span
            .in_scope(|| tracing::debug!(elapsed_ms, "request completed"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_creation() {
        let ctx = RequestContext::new("rpc");
        assert_eq!(ctx.source, "rpc");
        assert_eq!(ctx.request_id, ctx.correlation_id);
        assert!(ctx.operation.is_none());
        assert_eq!(ctx.short_id().len(), 8);
    }

    #[test]
    fn test_request_context_builder() {
        let correlation = Uuid::new_v4();
        let ctx = RequestContext::new("rpc")
            .with_correlation_id(correlation)
            .with_operation("workspaces.list")
            .with_metadata("client", "dashboard");

        assert_eq!(ctx.correlation_id, correlation);
        assert_ne!(ctx.request_id, correlation);
        assert_eq!(ctx.operation.as_deref(), Some("workspaces.list"));
        assert_eq!(ctx.metadata.get("client").map(String::as_str), Some("dashboard"));
        assert!(ctx.elapsed_ms() >= 0);
    }

    #[test]
    fn test_request_guard_records_caller() {
        let guard = RequestGuard::new(RequestContext::new("rpc"));
        guard.record_caller("5f1d7c3e9a1b2c3d4e5f6a7b", None);
        assert_eq!(guard.context().source, "rpc");
        let _entered = guard.span().enter();
    }
}
