//! Tutor service error types

use thiserror::Error;

/// Tutor error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TutorError {
    pub kind: TutorErrorKind,
    pub message: String,
}

impl TutorError {
    pub fn new(kind: TutorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(TutorErrorKind::Unknown, message)
    }
}

/// Error classification, used for logging.
///
/// Nothing retries a failed request; the session converts every failure
/// into one fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Authentication failed (401, 403)
    Auth,
    /// Bad request (400)
    InvalidRequest,
    /// Unknown error
    Unknown,
}
