//! Operation registry and dispatch.
//!
//! Every operation is registered once at startup with its protection and
//! requirement. [`Router::call`] looks the operation up, runs the
//! [`GuardChain`] and hands the extended [`ExecutionContext`] to the
//! handler. Failures of any stage come back as an [`ErrorEnvelope`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use folio_config::{ConfigFlag, ConfigFlags};
use folio_core::{ErrorEnvelope, IdentityResolver, RawRequest, RpcError};
use folio_telemetry::{RequestContext, RequestGuard};
use serde_json::Value;
use tracing::{Instrument, debug, info};

use crate::chain::GuardChain;
use crate::context::ExecutionContext;
use crate::error::{RegistrationError, RegistrationResult};
use crate::requirement::{OperationMeta, OperationRequirement, Protection};

/// Business logic behind one operation.
///
/// Handlers only run after every guard passed, so a workspace operation can
/// rely on [`ExecutionContext::require_auth`] carrying a workspace.
#[async_trait::async_trait]
pub trait OperationHandler: Send + Sync {
    /// Handle one call.
    async fn handle(&self, ctx: ExecutionContext, input: Value) -> Result<Value, RpcError>;
}

/// Handler backed by an async function or closure. See [`handler_fn`].
pub struct FnHandler<F>(F);

/// Wrap an async function as an [`OperationHandler`].
///
/// ```
/// use folio_core::RpcError;
/// use folio_guard::{ExecutionContext, handler_fn};
/// use serde_json::{Value, json};
///
/// let handler = handler_fn(|_ctx: ExecutionContext, input: Value| async move {
///     Ok::<_, RpcError>(json!({ "echo": input }))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(ExecutionContext, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, RpcError>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait::async_trait]
impl<F, Fut> OperationHandler for FnHandler<F>
where
    F: Fn(ExecutionContext, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, RpcError>> + Send + 'static,
{
    async fn handle(&self, ctx: ExecutionContext, input: Value) -> Result<Value, RpcError> {
        (self.0)(ctx, input).await
    }
}

/// A registered operation: metadata plus handler.
#[derive(Clone)]
pub struct Operation {
    meta: OperationMeta,
    handler: Arc<dyn OperationHandler>,
}

impl Operation {
    /// Create an operation from explicit metadata.
    pub fn new(meta: OperationMeta, handler: impl OperationHandler + 'static) -> Self {
        Self {
            meta,
            handler: Arc::new(handler),
        }
    }

    /// Workspace-bound operation. The requirement is marked workspace-bound.
    pub fn workspace(
        path: impl Into<String>,
        requirement: OperationRequirement,
        handler: impl OperationHandler + 'static,
    ) -> Self {
        let requirement = OperationRequirement {
            workspace_bound: true,
            ..requirement
        };
        Self::new(
            OperationMeta::new(path, Protection::Workspace, requirement),
            handler,
        )
    }

    /// User-bound operation. The requirement is marked workspace-independent.
    pub fn user(
        path: impl Into<String>,
        requirement: OperationRequirement,
        handler: impl OperationHandler + 'static,
    ) -> Self {
        let requirement = OperationRequirement {
            workspace_bound: false,
            ..requirement
        };
        Self::new(OperationMeta::new(path, Protection::User, requirement), handler)
    }

    /// Operation with no identity requirement.
    pub fn public(path: impl Into<String>, handler: impl OperationHandler + 'static) -> Self {
        Self::new(
            OperationMeta::new(path, Protection::Public, OperationRequirement::user()),
            handler,
        )
    }

    /// Require deployment capabilities in addition to the current requirement.
    #[must_use]
    pub fn with_config(mut self, flags: impl IntoIterator<Item = ConfigFlag>) -> Self {
        self.meta.requirement.required_config.extend(flags);
        self
    }

    /// The operation metadata.
    #[must_use]
    pub fn meta(&self) -> &OperationMeta {
        &self.meta
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Registry of operations with the guard chain in front of them.
#[derive(Debug)]
pub struct Router {
    chain: GuardChain,
    operations: BTreeMap<String, Operation>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolver>, flags: ConfigFlags) -> Self {
        Self {
            chain: GuardChain::new(resolver, Arc::new(flags)),
            operations: BTreeMap::new(),
        }
    }

    /// Register an operation.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if the operation is inconsistently
    /// declared or its path is already taken.
    pub fn register(&mut self, operation: Operation) -> RegistrationResult<&mut Self> {
        operation.meta.validate()?;
        if self.operations.contains_key(&operation.meta.path) {
            return Err(RegistrationError::DuplicatePath(
                operation.meta.path.clone(),
            ));
        }

        info!(
            operation = %operation.meta.path,
            protection = %operation.meta.protection,
            "registered operation"
        );
        self.operations
            .insert(operation.meta.path.clone(), operation);
        Ok(self)
    }

    /// Metadata of every registered operation, ordered by path.
    pub fn operations(&self) -> impl Iterator<Item = &OperationMeta> + '_ {
        self.operations.values().map(Operation::meta)
    }

    /// Look up a registered operation.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Operation> {
        self.operations.get(path)
    }

    /// The guard chain in front of every operation.
    #[must_use]
    pub fn chain(&self) -> &GuardChain {
        &self.chain
    }

    /// Run the operation at `path`.
    ///
    /// # Errors
    ///
    /// Returns the envelope of the first failing stage: unknown path,
    /// capability guard, authorization guard or handler.
    pub async fn call(
        &self,
        path: &str,
        request: &RawRequest,
        input: Value,
    ) -> Result<Value, ErrorEnvelope> {
        let Some(operation) = self.operations.get(path) else {
            debug!(operation = path, "unknown operation");
            return Err(RpcError::not_found(path).to_envelope(path));
        };

        let guard = RequestGuard::new(RequestContext::new("rpc").with_operation(path));
        let span = guard.span().clone();
        let guard = &guard;

        async move {
            let ctx = ExecutionContext::new(guard.context().clone());
            let ctx = self
                .chain
                .run(&operation.meta, request, ctx)
                .await
                .map_err(|e| RpcError::from(e).to_envelope(path))?;

            if let Some(auth) = ctx.auth() {
                let workspace = auth.workspace_id.map(|w| w.to_string());
                guard.record_caller(&auth.user_id.to_string(), workspace.as_deref());
            }

            operation.handler.handle(ctx, input).await.map_err(|e| {
                debug!(code = %e.kind, error = %e, "handler failed");
                e.to_envelope(path)
            })
        }
        .instrument(span)
        .await
    }
}
