//! Error types for session and transport operations.

use thiserror::Error;

/// Result alias for session operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Failures surfaced by the session controller and its transports.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend was unreachable or answered with a non-2xx status.
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint path that was requested.
        endpoint: &'static str,
        /// HTTP status when a response was received.
        status: Option<u16>,
        /// Transport or status detail.
        message: String,
    },
    /// The backend answered with a body outside the documented contract.
    #[error("unexpected response from {endpoint}: {detail}")]
    ContractViolation {
        /// Endpoint path whose response was rejected.
        endpoint: &'static str,
        /// What did not match.
        detail: String,
    },
    /// A logout request is already pending.
    #[error("logout already in progress")]
    LogoutInProgress,
    /// Session reconciliation already ran for this controller.
    #[error("session reconciliation already ran")]
    AlreadyBootstrapped,
}

impl AuthError {
    /// Build a transport error for a request that produced no response.
    #[must_use]
    pub fn unreachable(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            status: None,
            message: message.into(),
        }
    }

    /// Build a transport error for a non-2xx response.
    #[must_use]
    pub fn status(endpoint: &'static str, status: u16) -> Self {
        Self::Transport {
            endpoint,
            status: Some(status),
            message: format!("status {status}"),
        }
    }

    /// Build a contract violation.
    #[must_use]
    pub fn contract(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self::ContractViolation {
            endpoint,
            detail: detail.into(),
        }
    }

    /// HTTP status attached to a transport failure.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Failures reading or writing the persisted username.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected the operation.
    #[error("session storage unavailable: {detail}")]
    Unavailable {
        /// Backend-specific detail.
        detail: String,
    },
    /// The stored value could not be decoded.
    #[error("session storage entry is corrupt")]
    Corrupt,
}
