//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and bodies; services and ports only ever construct them.

use serde::{Deserialize, Serialize};

use super::validation::ValidationFailure;

/// Reason reported when the caller's identity could not be established.
pub const INVALID_AUTHENTICATION_MESSAGE: &str = "invalid email or password";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed one or more declared constraints.
    InvalidRequest,
    /// The caller could not be identified for a protected operation.
    InvalidAuthentication,
    /// The requested resource does not exist.
    NotFound,
    /// A backing service (e.g. the database) is unreachable.
    ServiceUnavailable,
    /// An unexpected infrastructure failure.
    InternalError,
}

/// Domain error.
///
/// # Examples
/// ```
/// use conduit_backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_authentication();
/// assert_eq!(err.code(), ErrorCode::InvalidAuthentication);
/// assert_eq!(err.to_string(), "invalid email or password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Validation failure rendered as a field-grouped envelope.
    #[error("request validation failed")]
    InvalidRequest(ValidationFailure),
    /// Caller identity could not be established.
    #[error("{message}")]
    InvalidAuthentication { message: String },
    /// Resource lookup came back empty where a value was required.
    #[error("{message}")]
    NotFound { message: String },
    /// Backing store unreachable.
    #[error("{message}")]
    ServiceUnavailable { message: String },
    /// Infrastructure failure; the message is never shown to clients.
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::InvalidAuthentication { .. } => ErrorCode::InvalidAuthentication,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Validation failure carried by [`Error::InvalidRequest`].
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::InvalidRequest(failure) => Some(failure),
            _ => None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(failure: ValidationFailure) -> Self {
        Self::InvalidRequest(failure)
    }

    /// Invalid authentication with the default reason.
    pub fn invalid_authentication() -> Self {
        Self::invalid_authentication_with(INVALID_AUTHENTICATION_MESSAGE)
    }

    /// Invalid authentication with a custom reason.
    pub fn invalid_authentication_with(message: impl Into<String>) -> Self {
        Self::InvalidAuthentication {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Self::InvalidRequest(failure)
    }
}
