//! Validation failures and the field-grouped error envelope.
//!
//! Three sources of validation failure reach the HTTP boundary:
//!
//! - [`ValidationFailure::InvalidRequest`]: field errors raised explicitly by
//!   handlers or services after binding a request.
//! - [`ValidationFailure::MethodArgument`]: declared constraints on an inbound
//!   request body (see [`BindingErrors::from_validation_errors`]).
//! - [`ValidationFailure::ConstraintViolations`]: constraints checked against
//!   service-call arguments, addressed by property paths.
//!
//! All three flatten into [`FieldError`] values, which an [`ErrorEnvelope`]
//! serialises as `{"errors": {field: [message, ...]}}`.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// One validation defect tied to a named input field.
///
/// # Examples
/// ```
/// use conduit_backend::domain::FieldError;
///
/// let error = FieldError::new("RegisterUserBody", "email", "Email", "should be an email");
/// assert_eq!(error.field(), "email");
/// assert_eq!(error.code(), "Email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    resource: String,
    field: String,
    code: String,
    message: String,
}

impl FieldError {
    /// Build a field error from its four parts.
    pub fn new(
        resource: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Logical owner of the field, usually the request or parameter type.
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }

    /// Dotted path of the field inside the payload.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Short symbolic cause, e.g. `NotBlank`.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Ordered collection of field errors rendered as the 422 response body.
///
/// ## Invariants
/// - Field keys appear once, in the order they were first seen.
/// - Messages for a field keep their insertion order; duplicates are kept.
///
/// # Examples
/// ```
/// use conduit_backend::domain::{ErrorEnvelope, FieldError};
///
/// let envelope = ErrorEnvelope::new(vec![
///     FieldError::new("User", "email", "NotBlank", "can't be empty"),
///     FieldError::new("User", "username", "NotBlank", "can't be empty"),
///     FieldError::new("User", "email", "Email", "should be an email"),
/// ]);
/// let json = serde_json::to_string(&envelope).unwrap();
/// assert_eq!(
///     json,
///     r#"{"errors":{"email":["can't be empty","should be an email"],"username":["can't be empty"]}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorEnvelope {
    field_errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    /// Wrap a list of field errors, preserving their order.
    pub fn new(field_errors: Vec<FieldError>) -> Self {
        Self { field_errors }
    }

    /// Field errors in insertion order.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Whether the envelope carries no errors.
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Group messages by field, keyed in first-seen order.
    pub fn grouped(&self) -> IndexMap<&str, Vec<&str>> {
        let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for error in &self.field_errors {
            grouped
                .entry(error.field())
                .or_default()
                .push(error.message());
        }
        grouped
    }
}

impl From<Vec<FieldError>> for ErrorEnvelope {
    fn from(field_errors: Vec<FieldError>) -> Self {
        Self::new(field_errors)
    }
}

impl Serialize for ErrorEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut root = serializer.serialize_map(Some(1))?;
        root.serialize_entry("errors", &self.grouped())?;
        root.end()
    }
}

/// A single rejected field recorded while binding a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFieldError {
    field: String,
    code: String,
    message: String,
}

impl BindingFieldError {
    fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the rejected field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Constraint code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Default message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Field rejections collected against one bound object.
///
/// # Examples
/// ```
/// use conduit_backend::domain::BindingErrors;
///
/// let errors = BindingErrors::new("FollowRequest")
///     .with_rejection("username", "SelfFollow", "cannot follow yourself");
/// assert_eq!(errors.field_errors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingErrors {
    object_name: String,
    field_errors: Vec<BindingFieldError>,
}

impl BindingErrors {
    /// Start an empty rejection list for the named object.
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
        }
    }

    /// Record a rejected field.
    pub fn reject(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.field_errors
            .push(BindingFieldError::new(field, code, message));
    }

    /// Builder-style variant of [`BindingErrors::reject`].
    pub fn with_rejection(
        mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.reject(field, code, message);
        self
    }

    /// Name of the object the rejections belong to.
    pub fn object_name(&self) -> &str {
        self.object_name.as_str()
    }

    /// Rejections in the order they were recorded.
    pub fn field_errors(&self) -> &[BindingFieldError] {
        &self.field_errors
    }

    /// Whether no field was rejected.
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Flatten `validator` output into binding rejections.
    ///
    /// Nested structs contribute `parent.child` paths and lists contribute
    /// `parent[index].child` paths. `validator` keeps fields in a hash map, so
    /// field names are visited in lexicographic order; the errors of a single
    /// field keep their declaration order.
    pub fn from_validation_errors(object_name: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut binding = Self::new(object_name);
        collect_validation_errors("", errors, &mut binding.field_errors);
        binding
    }

    fn to_field_errors(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.field_errors.iter().map(|error| {
            FieldError::new(
                self.object_name.as_str(),
                error.field(),
                error.code(),
                error.message(),
            )
        })
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn message_for(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map_or_else(|| error.code.to_string(), ToString::to_string)
}

fn collect_validation_errors(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut Vec<BindingFieldError>,
) {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, kind) in entries {
        let path = join_path(prefix, &name.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    BindingFieldError::new(path.as_str(), error.code.to_string(), message_for(error))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_errors(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

/// A constraint that failed against a service-call argument.
///
/// `property_path` is addressed from the call itself, e.g.
/// `update_user.command.email`: operation name, parameter name, then the path
/// inside the parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    root_type: String,
    property_path: String,
    constraint: String,
    message: String,
}

impl ConstraintViolation {
    /// Build a violation from its parts.
    pub fn new(
        root_type: impl Into<String>,
        property_path: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            root_type: root_type.into(),
            property_path: property_path.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Type that declared the violated constraint.
    pub fn root_type(&self) -> &str {
        self.root_type.as_str()
    }

    /// Raw property path, before normalisation.
    pub fn property_path(&self) -> &str {
        self.property_path.as_str()
    }

    /// Name of the violated constraint, used as the field error code.
    pub fn constraint(&self) -> &str {
        self.constraint.as_str()
    }

    /// Violation message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Map onto a field error, normalising the property path.
    pub fn to_field_error(&self) -> FieldError {
        FieldError::new(
            self.root_type.as_str(),
            normalize_property_path(&self.property_path),
            self.constraint.as_str(),
            self.message.as_str(),
        )
    }
}

/// Strip the operation and parameter segments from a property path.
///
/// Trailing empty segments are ignored. A single segment is kept as is;
/// otherwise the first two segments are dropped and the remainder rejoined
/// with `.`.
///
/// # Examples
/// ```
/// use conduit_backend::domain::normalize_property_path;
///
/// assert_eq!(normalize_property_path("email"), "email");
/// assert_eq!(normalize_property_path("login.arg0"), "");
/// assert_eq!(normalize_property_path("login.arg0.email"), "email");
/// assert_eq!(normalize_property_path("a.b.c.d"), "c.d");
/// assert_eq!(normalize_property_path("a.b.c."), "c");
/// ```
pub fn normalize_property_path(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('.').collect();
    while segments.last().is_some_and(|segment| segment.is_empty()) {
        segments.pop();
    }
    if segments.len() == 1 {
        return path.to_owned();
    }
    segments.iter().skip(2).copied().collect::<Vec<_>>().join(".")
}

/// Every validation failure that is rendered as an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Field errors raised explicitly after binding a request.
    InvalidRequest(BindingErrors),
    /// Declared constraints on a request body failed.
    MethodArgument(BindingErrors),
    /// Constraints on service-call arguments failed.
    ConstraintViolations(Vec<ConstraintViolation>),
}

impl ValidationFailure {
    /// Flatten the failure into field errors, preserving order.
    pub fn to_field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::InvalidRequest(binding) | Self::MethodArgument(binding) => {
                binding.to_field_errors().collect()
            }
            Self::ConstraintViolations(violations) => violations
                .iter()
                .map(ConstraintViolation::to_field_error)
                .collect(),
        }
    }

    /// Build the response envelope for this failure.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.to_field_errors())
    }

    /// Whether the failure carries no field errors at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::InvalidRequest(binding) | Self::MethodArgument(binding) => binding.is_empty(),
            Self::ConstraintViolations(violations) => violations.is_empty(),
        }
    }
}
