//! The guard chain run in front of every operation.
//!
//! # Order
//!
//! 1. Metadata consistency, then the capability guard when the operation
//!    declares config flags
//! 2. Public operations stop here
//! 3. Identity resolution; resolver failures count as no identity
//! 4. Authorization guard in the operation's call-site mode
//! 5. The execution context is extended with the verified caller

use std::sync::Arc;

use folio_config::ConfigFlags;
use folio_core::{AuthError, AuthResult, IdentityResolver, RawRequest};
use tracing::{debug, warn};

use crate::authorize::authorize;
use crate::capability::check_capabilities;
use crate::context::ExecutionContext;
use crate::requirement::{OperationMeta, Protection};

/// Capability and authorization guards bound to a resolver and a flag
/// snapshot.
#[derive(Clone)]
pub struct GuardChain {
    resolver: Arc<dyn IdentityResolver>,
    flags: Arc<ConfigFlags>,
}

impl GuardChain {
    /// Create a guard chain.
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolver>, flags: Arc<ConfigFlags>) -> Self {
        Self { resolver, flags }
    }

    /// The capability snapshot the chain checks against.
    #[must_use]
    pub fn flags(&self) -> &ConfigFlags {
        &self.flags
    }

    /// Run every guard for `meta` and return the extended context.
    ///
    /// # Errors
    ///
    /// Returns the first guard failure: `ServerError` for inconsistent
    /// metadata or a disabled capability, then whatever the authorization
    /// guard raises.
    pub async fn run(
        &self,
        meta: &OperationMeta,
        request: &RawRequest,
        ctx: ExecutionContext,
    ) -> AuthResult<ExecutionContext> {
        if let Err(e) = meta.validate() {
            warn!(operation = %meta.path, error = %e, "refusing inconsistent operation metadata");
            return Err(AuthError::ServerError);
        }

        if meta.requirement.requires_config() {
            check_capabilities(&self.flags, &meta.requirement)?;
        }

        if meta.protection == Protection::Public {
            debug!(operation = %meta.path, "public operation, skipping authorization");
            return Ok(ctx);
        }

        let identity = match self.resolver.resolve(request).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(operation = %meta.path, error = %e, "identity resolution failed");
                None
            },
        };
        let kind = identity.as_ref().map_or("none", |identity| identity.kind());

        match authorize(
            identity.as_ref(),
            &meta.requirement,
            meta.protection.is_workspace_bound(),
        ) {
            Ok(auth) => {
                debug!(
                    operation = %meta.path,
                    identity = kind,
                    workspace_bound = auth.is_workspace_bound(),
                    "authorized"
                );
                Ok(ctx.extend_auth(auth))
            },
            Err(e) => {
                warn!(
                    operation = %meta.path,
                    identity = kind,
                    code = %e.kind(),
                    "authorization denied"
                );
                Err(e)
            },
        }
    }
}

impl std::fmt::Debug for GuardChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardChain")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
