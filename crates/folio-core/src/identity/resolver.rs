use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::{ResolveError, ResolveResult};
use super::types::{Identity, SessionIdentity, TokenIdentity};

/// Name of the cookie carrying the session access token.
pub const SESSION_COOKIE: &str = "accessToken";

/// The transport-level view of an incoming call that resolvers read
/// credentials from. Header names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    headers: HashMap<String, String>,
}

impl RawRequest {
    /// Create a request with no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Append a cookie to the `cookie` header.
    #[must_use]
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        let pair = format!("{name}={value}");
        self.headers
            .entry("cookie".to_string())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(&pair);
            })
            .or_insert(pair);
        self
    }

    /// Set a bearer `authorization` header.
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("authorization", format!("Bearer {token}"))
    }

    /// Look up a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a cookie by name.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.header("cookie")?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Extract a bearer credential from the `authorization` header.
    ///
    /// Returns `Ok(None)` when the header is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedCredential`] if the header uses a
    /// scheme other than `Bearer` or carries an empty credential.
    pub fn bearer(&self) -> ResolveResult<Option<&str>> {
        let Some(value) = self.header("authorization") else {
            return Ok(None);
        };
        let (scheme, credential) = value.trim().split_once(' ').ok_or_else(|| {
            ResolveError::MalformedCredential("authorization header has no scheme".to_string())
        })?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(ResolveError::MalformedCredential(format!(
                "unsupported authorization scheme: {scheme}"
            )));
        }
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(ResolveError::MalformedCredential(
                "empty bearer credential".to_string(),
            ));
        }
        Ok(Some(credential))
    }
}

/// Turns a raw request into a caller identity.
///
/// Implementations are shared by all concurrent calls and must be safe to
/// invoke concurrently (e.g. backed by a pooled store).
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the caller, or `None` when no credential is present.
    async fn resolve(&self, request: &RawRequest) -> ResolveResult<Option<Identity>>;
}

#[async_trait::async_trait]
impl<T: IdentityResolver + ?Sized> IdentityResolver for Arc<T> {
    async fn resolve(&self, request: &RawRequest) -> ResolveResult<Option<Identity>> {
        (**self).resolve(request).await
    }
}

/// In-memory resolver for testing and simple deployments.
///
/// Bearer credentials are looked up in the token table and the
/// [`SESSION_COOKIE`] value in the session table. A present `authorization`
/// header takes precedence over the session cookie.
#[derive(Debug, Default)]
pub struct InMemoryIdentityResolver {
    sessions: RwLock<HashMap<String, SessionIdentity>>,
    tokens: RwLock<HashMap<String, TokenIdentity>>,
}

impl InMemoryIdentityResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Register a session under its access token.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Internal`] if the table lock is poisoned.
    pub fn insert_session(
        &self,
        access_token: impl Into<String>,
        session: SessionIdentity,
    ) -> ResolveResult<()> {
        self.sessions
            .write()
            .map_err(|e| ResolveError::Internal(format!("session table poisoned: {e}")))?
            .insert(access_token.into(), session);
        Ok(())
    }

    /// Register an API token under its secret.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Internal`] if the table lock is poisoned.
    pub fn insert_token(
        &self,
        secret: impl Into<String>,
        token: TokenIdentity,
    ) -> ResolveResult<()> {
        self.tokens
            .write()
            .map_err(|e| ResolveError::Internal(format!("token table poisoned: {e}")))?
            .insert(secret.into(), token);
        Ok(())
    }

    /// Forget a session or token credential. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Internal`] if a table lock is poisoned.
    pub fn revoke(&self, credential: &str) -> ResolveResult<bool> {
        let session = self
            .sessions
            .write()
            .map_err(|e| ResolveError::Internal(format!("session table poisoned: {e}")))?
            .remove(credential)
            .is_some();
        let token = self
            .tokens
            .write()
            .map_err(|e| ResolveError::Internal(format!("token table poisoned: {e}")))?
            .remove(credential)
            .is_some();
        Ok(session || token)
    }
}

#[async_trait::async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn resolve(&self, request: &RawRequest) -> ResolveResult<Option<Identity>> {
        if let Some(secret) = request.bearer()? {
            let tokens = self
                .tokens
                .read()
                .map_err(|e| ResolveError::Lookup(format!("token table poisoned: {e}")))?;
            return Ok(tokens.get(secret).cloned().map(Identity::Token));
        }

        let Some(access_token) = request.cookie(SESSION_COOKIE) else {
            return Ok(None);
        };
        let sessions = self
            .sessions
            .read()
            .map_err(|e| ResolveError::Lookup(format!("session table poisoned: {e}")))?;
        Ok(sessions.get(access_token).cloned().map(Identity::Session))
    }
}
