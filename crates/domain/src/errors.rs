//! Error types used throughout the client
//!
//! [`OrchexError`] is the closed vocabulary for every distinguishable
//! failure mode of a client operation. The first ten variants form the
//! response/transport taxonomy; `InvalidInput` and `Config` are local
//! precondition failures that fire before any network attempt and are never
//! produced by response classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Orchex client operations
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OrchexError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("server error: {0}")]
    Server(String),

    /// 502/504 sub-kind of the server family.
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// Transport-level timeout (connect, read, or write budget exhausted).
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Transport-level connection failure (refused, DNS, reset).
    #[error("connection failed: {0}")]
    Connection(String),

    /// Status code outside the classification table, or an unparseable
    /// success body.
    #[error("HTTP {status}: {body}")]
    Unexpected { status: u16, body: String },

    /// Local precondition failure (empty idempotency key or task name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration problem (unconfigured client name, malformed host
    /// base, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),
}

impl OrchexError {
    /// True for the server family, including the `BadGateway` sub-kind.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server(_) | Self::BadGateway(_))
    }

    /// True for failures raised locally, before any network attempt.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Config(_))
    }
}

/// Result type alias for Orchex client operations
pub type Result<T> = std::result::Result<T, OrchexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_family_includes_bad_gateway() {
        assert!(OrchexError::Server("boom".into()).is_server_error());
        assert!(OrchexError::BadGateway("upstream".into()).is_server_error());
        assert!(!OrchexError::NotFound("missing".into()).is_server_error());
    }

    #[test]
    fn local_kinds_are_not_taxonomy_outcomes() {
        assert!(OrchexError::InvalidInput("idem_key required".into()).is_local());
        assert!(OrchexError::Config("client not configured".into()).is_local());
        assert!(!OrchexError::Unauthorized("nope".into()).is_local());
        assert!(!OrchexError::Timeout("slow".into()).is_local());
    }

    #[test]
    fn unexpected_displays_status_and_body() {
        let err = OrchexError::Unexpected { status: 418, body: "teapot".into() };
        assert_eq!(err.to_string(), "HTTP 418: teapot");
    }
}
