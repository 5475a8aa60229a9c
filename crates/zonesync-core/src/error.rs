//! Error types for zonesync
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zonesync
///
/// The HTTP-derived variants carry the raw response body so the provider's
/// own diagnostics reach the caller untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// The provider rejected the request (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// The credential was missing, invalid or expired (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// The credential is valid but lacks access (HTTP 403)
    #[error("{0}")]
    Forbidden(String),

    /// The requested resource does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// The domain is not registered with the provider, so its zone cannot
    /// be created there
    #[error("{0}")]
    UnknownDomainName(String),

    /// Any other non-success HTTP status
    #[error("HTTP error {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Network-level failure (connection, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record data that cannot be represented or fails validation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record with the same name and type is already in the zone
    #[error("Duplicate record: {0}")]
    DuplicateRecord(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an error for a non-success HTTP status
    ///
    /// 400, 401, 403 and 404 get their dedicated variants; everything else
    /// becomes [`Error::Http`].
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 => Self::BadRequest(body),
            401 => Self::Unauthorized(body),
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            _ => Self::Http { status, body },
        }
    }

    /// HTTP status code this error was built from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
