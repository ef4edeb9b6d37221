//! Error types for the canpay client.
//!
//! Every failure surfaces to the immediate caller. The library adds no retry
//! and does not log errors; deciding whether to re-authenticate after a
//! rejected request is left to the embedding application.

use thiserror::Error;

/// The unified error type for canpay operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation that needs a session was called before logging in.
    ///
    /// Raised locally; no request is sent.
    #[error("not authenticated: log in first")]
    Unauthenticated,

    /// Failure reported by the HTTP transport, including non-success statuses.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A login, registration or renewal response lacked a usable credential.
    #[error("malformed credential response: missing or empty `{field}`")]
    MalformedCredentialResponse { field: &'static str },

    /// The service answered, but not with the shape a helper needed.
    #[error("unexpected response: {reason}")]
    UnexpectedResponse { reason: String },

    /// Input rejected before any request was built.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
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

    /// The server answered with a non-success status.
    ///
    /// `body` is the raw response text, kept as-is.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The success body could not be decoded as JSON.
    #[error("could not decode response body: {message}")]
    Decode { message: String },

    /// Any other HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Returns the HTTP status for [`TransportError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
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
        } else if err.is_decode() {
            TransportError::Decode {
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

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A token contains characters that cannot go into an HTTP header.
    #[error("credential is not a valid header value")]
    HeaderValue,

    /// XRP transfers must carry a destination tag.
    #[error("a destination tag is required when remitting XRP")]
    MissingTransferTag,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl Error {
    /// True when this is the local [`Error::Unauthenticated`] guard.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Error::Unauthenticated)
    }

    /// Returns the HTTP status if the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }
}
