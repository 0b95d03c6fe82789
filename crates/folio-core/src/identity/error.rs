/// Errors that can occur while resolving a caller identity.
///
/// The guard chain never forwards these to the caller; any resolution
/// failure is reported as unauthorized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A credential was present but could not be parsed.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// The credential store could not be queried.
    #[error("credential lookup failed: {0}")]
    Lookup(String),

    /// Internal resolver error
    #[error("internal resolver error: {0}")]
    Internal(String),
}

/// Result type for identity resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
