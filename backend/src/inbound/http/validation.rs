//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies derive [`validator::Validate`]; [`validate_body`] turns the
//! collected failures into a method-argument [`ValidationFailure`]. Bodies
//! that do not parse at all are reported through [`json_config`].

use std::borrow::Cow;

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use tracing::debug;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::{BindingErrors, Error, UserValidationError, ValidationFailure};

pub(crate) const NOT_BLANK: &str = "NotBlank";
pub(crate) const NOT_BLANK_MESSAGE: &str = "can't be empty";
pub(crate) const EMAIL: &str = "Email";
pub(crate) const EMAIL_MESSAGE: &str = "should be an email";

/// Field and code reported for request bodies that fail to parse.
pub(crate) const MALFORMED_FIELD: &str = "body";
pub(crate) const MALFORMED: &str = "Malformed";

/// Reject strings that are empty once trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(NOT_BLANK).with_message(Cow::Borrowed(NOT_BLANK_MESSAGE)));
    }
    Ok(())
}

/// Reject blank strings, then strings that are not email-shaped.
///
/// At most one failure is reported so a blank email carries one message.
pub(crate) fn email_address(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new(EMAIL).with_message(Cow::Borrowed(EMAIL_MESSAGE)))
}

/// Check declared constraints on `body`.
///
/// # Errors
///
/// Returns an invalid-request error carrying
/// [`ValidationFailure::MethodArgument`] when any constraint fails.
pub(crate) fn validate_body<T: Validate>(body: &T, object_name: &str) -> Result<(), Error> {
    body.validate().map_err(|errors| {
        let binding = BindingErrors::from_validation_errors(object_name, &errors);
        debug!(object_name, rejected = binding.field_errors().len(), "request body rejected");
        Error::from(ValidationFailure::MethodArgument(binding))
    })
}

/// Report a domain value that failed validation after binding.
pub(crate) fn rejected_value(object_name: &str, error: &UserValidationError) -> Error {
    let binding = BindingErrors::new(object_name).with_rejection(
        error.field(),
        error.constraint(),
        error.to_string(),
    );
    Error::from(ValidationFailure::InvalidRequest(binding))
}

fn malformed_body(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    debug!(%error, "request body could not be parsed");
    let binding =
        BindingErrors::new(MALFORMED_FIELD).with_rejection(MALFORMED_FIELD, MALFORMED, error.to_string());
    Error::from(ValidationFailure::InvalidRequest(binding)).into()
}

/// JSON extractor configuration reporting parse failures as 422 envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(malformed_body)
}
