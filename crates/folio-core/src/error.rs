//! Error taxonomy for the authorization pipeline.
//!
//! [`AuthError`] is what the guards raise. [`RpcError`] is what reaches the
//! transport: guard failures plus routing and handler failures. Both render
//! into the same [`ErrorEnvelope`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discriminant surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No credential could be resolved.
    Unauthorized,
    /// The caller lacks a required permission.
    Forbidden,
    /// The request is structurally invalid.
    BadRequest,
    /// No operation is registered under the requested path.
    NotFound,
    /// The deployment cannot serve the operation.
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    ServerError,
}

impl ErrorKind {
    /// RPC code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::ServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Numeric JSON-RPC error code.
    #[must_use]
    pub const fn json_rpc_code(&self) -> i32 {
        match self {
            Self::Unauthorized => -32001,
            Self::Forbidden => -32003,
            Self::BadRequest => -32600,
            Self::NotFound => -32004,
            Self::ServerError => -32603,
        }
    }

    /// HTTP status used when the envelope travels over HTTP.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured cause attached to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCause {
    /// A user or workspace identifier could not be resolved.
    WorkspaceError,
}

impl ErrorCause {
    /// Wire name of the cause.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkspaceError => "workspaceError",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by the authorization and capability guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No identity was resolved for the call.
    #[error("unauthorized")]
    Unauthorized,

    /// The identity lacks at least one required permission.
    #[error("forbidden")]
    Forbidden,

    /// An identifier carried by the credential is malformed.
    #[error("bad request: {cause}")]
    BadRequest {
        /// Structured cause forwarded to the caller.
        cause: ErrorCause,
    },

    /// The deployment is missing a capability the operation needs.
    #[error("server error: required capability unavailable")]
    ServerError,
}

impl AuthError {
    /// Shorthand for the workspace resolution failure.
    #[must_use]
    pub const fn workspace_error() -> Self {
        Self::BadRequest {
            cause: ErrorCause::WorkspaceError,
        }
    }

    /// Discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::ServerError => ErrorKind::ServerError,
        }
    }

    /// RPC code string of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// Structured cause, if any.
    #[must_use]
    pub const fn cause(&self) -> Option<ErrorCause> {
        match self {
            Self::BadRequest { cause } => Some(*cause),
            _ => None,
        }
    }
}

/// Result type for guard operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// An error on its way to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RpcError {
    /// Discriminant.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Optional structured cause.
    pub cause: Option<ErrorCause>,
}

impl RpcError {
    /// Create an error with no cause.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach a structured cause.
    #[must_use]
    pub fn with_cause(mut self, cause: ErrorCause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Unknown operation path.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("no operation registered at '{path}'"))
    }

    /// Invalid input from the caller.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Unexpected server-side failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message)
    }

    /// Render into the standard envelope for `path`.
    #[must_use]
    pub fn to_envelope(&self, path: &str) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.message.clone(),
            code: self.kind.json_rpc_code(),
            data: ErrorData {
                code: self.kind,
                http_status: self.kind.http_status(),
                path: path.to_string(),
                cause: self.cause,
            },
        }
    }
}

impl From<AuthError> for RpcError {
    fn from(err: AuthError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            cause: err.cause(),
        }
    }
}

/// The error shape returned to RPC callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable message.
    pub message: String,
    /// Numeric JSON-RPC code.
    pub code: i32,
    /// Structured data.
    pub data: ErrorData,
}

/// Structured part of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    /// Discriminant.
    pub code: ErrorKind,
    /// HTTP status.
    pub http_status: u16,
    /// Operation path the error belongs to.
    pub path: String,
    /// Structured cause, `null` when absent.
    pub cause: Option<ErrorCause>,
}

impl ErrorEnvelope {
    /// Discriminant of the enveloped error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.data.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(
            AuthError::workspace_error().to_string(),
            "bad request: workspaceError"
        );
    }

    #[test]
    fn test_kinds_and_causes() {
        assert_eq!(AuthError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(AuthError::Forbidden.cause(), None);
        assert_eq!(AuthError::ServerError.http_status(), 500);
        assert_eq!(AuthError::ServerError.code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(AuthError::Unauthorized.http_status(), 401);
        assert_eq!(
            AuthError::workspace_error().cause(),
            Some(ErrorCause::WorkspaceError)
        );
    }

    #[test]
    fn test_envelope_carries_cause() {
        let rpc = RpcError::from(AuthError::workspace_error());
        let envelope = rpc.to_envelope("contentPieces.list");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["code"], -32600);
        assert_eq!(json["data"]["code"], "BAD_REQUEST");
        assert_eq!(json["data"]["httpStatus"], 400);
        assert_eq!(json["data"]["path"], "contentPieces.list");
        assert_eq!(json["data"]["cause"], "workspaceError");
    }

    #[test]
    fn test_envelope_null_cause() {
        let envelope = RpcError::from(AuthError::ServerError).to_envelope("search.query");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["data"]["code"], "INTERNAL_SERVER_ERROR");
        assert!(json["data"]["cause"].is_null());

        let back: ErrorEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), ErrorKind::ServerError);
    }
}
