//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed domain entities and the use cases acting on
//! them. Types here know nothing about HTTP or SQL; adapters in `inbound` and
//! `outbound` translate at the edges.
//!
//! Public surface:
//! - Error: transport-agnostic failure.
//! - ErrorEnvelope, FieldError, ValidationFailure: validation failures and
//!   their field-grouped wire shape.
//! - User, FollowRelation: accounts and the follow graph.
//! - UserService: implementation of the user driving ports.

pub mod error;
mod follow_relation;
pub mod ports;
pub mod user;
mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, INVALID_AUTHENTICATION_MESSAGE};
pub use self::follow_relation::FollowRelation;
pub use self::user::{Email, User, UserChanges, UserId, UserValidationError, Username};
pub use self::user_service::UserService;
pub use self::validation::{
    BindingErrors, BindingFieldError, ConstraintViolation, ErrorEnvelope, FieldError,
    ValidationFailure, normalize_property_path,
};
