//! Error types for the coverflex library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, persistence and input validation
//! errors.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for coverflex operations.
///
/// Callers that need to react to authentication state should use
/// [`Error::is_unauthenticated`] ("log in again, no new input needed") and
/// [`Error::is_invalid_credentials`] ("the email, password or OTP was wrong").
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (no session, rejected credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (unexpected status, undecodable body).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Token repository read/write failures.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Input validation errors (bad base URL, empty token).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Whether the caller has to run the login flow again.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Error::Auth(AuthError::Unauthenticated { .. }))
    }

    /// Whether the remote service rejected the supplied credentials or OTP.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Error::Auth(AuthError::InvalidCredentials { .. }))
    }

    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth(AuthError::InvalidCredentials { status, .. }) => Some(*status),
            Error::Protocol(ProtocolError::UnexpectedStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn unauthenticated(reason: impl Into<String>) -> Self {
        Error::Auth(AuthError::Unauthenticated {
            reason: reason.into(),
        })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed (includes DNS and TLS handshake failures).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

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

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No stored session, or the stored session could not be renewed.
    #[error("not logged in: {reason}")]
    Unauthenticated { reason: String },

    /// Login or OTP submission was rejected by the server.
    #[error("invalid credentials (HTTP {status}): {body}")]
    InvalidCredentials { status: u16, body: String },
}

/// Protocol-level errors from the remote service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The server answered with a status the operation does not accept.
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// A success response did not carry a required token.
    #[error("response is missing {field}")]
    MissingToken { field: &'static str },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Decode {
            message: err.to_string(),
        }
    }
}

/// Token repository errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No token pair has been saved, or it was deleted.
    #[error("no stored tokens")]
    NotFound,

    /// Reading or writing the backing store failed.
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The backing store holds data that is not a token pair.
    #[error("corrupt token store at {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// An access token must never be stored empty.
    #[error("access token must not be empty")]
    EmptyAccessToken,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
