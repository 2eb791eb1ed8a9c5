//! Error types for the Sentiview client SDK.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for every gateway operation.
///
/// This provides typed, structured error variants so callers can
/// distinguish pre-flight validation failures, session expiry, declared
/// backend errors, and transport-level failures.
#[derive(Error, Debug, Clone, Serialize)]
pub enum GatewayError {
    /// Client-side validation failure, rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP 401 from any backend target; the session has already been
    /// invalidated by the time this error is returned
    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    /// 4xx/5xx response carrying the backend's declared error message
    /// when present, or a status-derived fallback otherwise
    #[error("Backend error ({status_code}): {message}")]
    Backend { status_code: u16, message: String },

    /// Network or transport failure with no response
    #[error("Transport error: {message}")]
    Transport { message: String, is_retryable: bool },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a SessionExpired error
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired {
            message: message.into(),
        }
    }

    /// Creates a Backend error
    pub fn backend(status_code: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>, is_retryable: bool) -> Self {
        Self::Transport {
            message: message.into(),
            is_retryable,
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a session-expiry error
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Check if this is a backend-declared error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// The HTTP status code that produced this error, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::SessionExpired { .. } => Some(401),
            Self::Backend { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether retrying the same call might succeed.
    ///
    /// Only transport failures classified as connect/timeout are marked
    /// retryable; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                is_retryable: true,
                ..
            }
        )
    }
}

/// A type alias for `Result<T, GatewayError>`.
pub type Result<T> = std::result::Result<T, GatewayError>;
