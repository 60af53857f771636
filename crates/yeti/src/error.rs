//! Error types for the yeti client.
//!
//! Callers see a small taxonomy: local misuse ([`UsageError`]), server
//! rejections ([`ApiError`]), exhausted re-authentication ([`AuthError`]) and
//! network failures that never produced a response ([`TransportError`]).

use std::fmt;
use thiserror::Error;

/// The unified error type for yeti operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller misused the API. Raised before any network I/O.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// The server answered with a non-2xx status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication still failed after the retry budget was spent.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server broke its response contract (e.g. no access token).
    #[error("integrity error: {message}")]
    Integrity { message: String },

    /// A successful response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local I/O failure, e.g. reading an archive to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the HTTP status code for API errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status_code),
            _ => None,
        }
    }

    /// Check if this is an API error with status 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub(crate) fn integrity(message: impl Into<String>) -> Self {
        Error::Integrity {
            message: message.into(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Builder { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Builder {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A non-2xx response from the Yeti API.
///
/// `message` is the raw response text, kept verbatim so server-side
/// diagnostics reach the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as returned by the server.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status_code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Authentication failed even after refreshing the credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    /// Description of the last 401 response.
    pub message: String,
}

impl AuthError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Caller misuse detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Both a JSON and a binary body were supplied.
    #[error("provide either a JSON body or a binary body, not both")]
    ConflictingBodies,

    /// Authentication was attempted without an API key.
    #[error("no API key provided")]
    MissingApiKey,

    /// A search was issued without any filter.
    #[error("at least one of {fields} must be provided")]
    EmptySearch { fields: &'static str },

    /// HTTP method outside GET/POST/PATCH.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Invalid root URL.
    #[error("invalid root URL '{value}': {reason}")]
    RootUrl { value: String, reason: String },

    /// Header name or value that HTTP cannot carry.
    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    /// An object is missing the fields needed to reference it.
    #[error("invalid object reference: {reason}")]
    ObjectReference { reason: String },
}
