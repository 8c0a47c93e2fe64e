//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.
//!
//! | Failure                | Status | Body                          |
//! |------------------------|--------|-------------------------------|
//! | invalid request        | 422    | `{"errors":{field:[msg]}}`    |
//! | invalid authentication | 422    | `{"message":reason}`          |
//! | not found              | 404    | `{"message":reason}`          |
//! | service unavailable    | 503    | `{"message":reason}`          |
//! | internal               | 500    | `{"message":"Internal server error"}` |

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of internal failure detail.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// `{"message": ...}` body used by every non-validation failure.
#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidAuthentication => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(MessageBody { message })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            Self::InvalidRequest(failure) => {
                HttpResponse::build(status).json(failure.to_envelope())
            }
            Self::InvalidAuthentication { message } | Self::NotFound { message } => {
                message_response(status, message)
            }
            Self::ServiceUnavailable { message } => {
                warn!(%message, "backing service unavailable");
                message_response(status, message)
            }
            Self::Internal { message } => {
                error!(%message, "request failed with internal error");
                message_response(status, REDACTED_MESSAGE)
            }
        }
    }
}
