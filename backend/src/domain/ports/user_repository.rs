//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, FollowRelation, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (username or email) is already held by another user.
        UniqueViolation { message: String } => "user repository unique constraint violated: {message}",
    }
}

/// Persistence contract for users and follow relations.
///
/// Lookups report absence as `Ok(None)`; errors are reserved for
/// infrastructure failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, or update every mutable column of the row with the
    /// same id.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Record a follow relation; recording an existing one is a no-op.
    async fn save_relation(&self, relation: &FollowRelation) -> Result<(), UserPersistenceError>;

    /// Fetch the relation from `user_id` to `target_id`, if any.
    async fn find_relation(
        &self,
        user_id: &UserId,
        target_id: &UserId,
    ) -> Result<Option<FollowRelation>, UserPersistenceError>;

    /// Delete a follow relation; deleting a missing one is a no-op.
    async fn remove_relation(&self, relation: &FollowRelation)
    -> Result<(), UserPersistenceError>;
}
