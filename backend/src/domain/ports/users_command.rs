//! Driving port for user mutations: registration, profile updates, follows.

use async_trait::async_trait;

use crate::domain::{Email, Error, User, UserChanges, Username};

use super::ProfileData;

/// Input for [`UsersCommand::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub username: Username,
    pub email: Email,
    pub bio: String,
    pub image: String,
}

impl RegisterUserRequest {
    /// Request with empty profile fields.
    pub fn new(username: Username, email: Email) -> Self {
        Self {
            username,
            email,
            bio: String::new(),
            image: String::new(),
        }
    }
}

/// Profile update addressed at a specific user.
///
/// The email and username in `param` must not belong to a different user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserCommand {
    target_user: User,
    param: UserChanges,
}

impl UpdateUserCommand {
    pub fn new(target_user: User, param: UserChanges) -> Self {
        Self { target_user, param }
    }

    /// User whose profile is changed.
    pub fn target_user(&self) -> &User {
        &self.target_user
    }

    /// Requested changes.
    pub fn param(&self) -> &UserChanges {
        &self.param
    }

    pub fn into_parts(self) -> (User, UserChanges) {
        (self.target_user, self.param)
    }
}

/// Domain use-case port for mutating users and follow relations.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account with a fresh id.
    ///
    /// Rejects usernames and emails already in use with constraint violations
    /// on `username` and `email`.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Apply a profile update and return the stored user.
    async fn update_user(&self, command: UpdateUserCommand) -> Result<User, Error>;

    /// Make `follower` follow `username`; following twice is a no-op.
    async fn follow(&self, follower: &User, username: &Username) -> Result<ProfileData, Error>;

    /// Make `follower` stop following `username`; a missing relation is a
    /// no-op.
    async fn unfollow(&self, follower: &User, username: &Username)
    -> Result<ProfileData, Error>;
}
