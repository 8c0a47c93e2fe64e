//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. The
//! service owns the uniqueness rules for usernames and emails and reports
//! them as constraint violations addressed from the operation that failed.

use std::any::type_name;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ProfileData, RegisterUserRequest, UpdateUserCommand, UserData, UserPersistenceError,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    BindingErrors, ConstraintViolation, Error, FollowRelation, User, UserId, Username,
    ValidationFailure,
};

const DUPLICATED_USERNAME: (&str, &str) = ("DuplicatedUsername", "duplicated username");
const DUPLICATED_EMAIL: (&str, &str) = ("DuplicatedEmail", "duplicated email");
const UPDATE_USER_CONSTRAINT: &str = "UpdateUserConstraint";

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
pub struct UserService<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::UniqueViolation { message } => {
            Error::internal(format!("unexpected user uniqueness conflict: {message}"))
        }
    }
}

fn profile_not_found(username: &Username) -> Error {
    Error::not_found(format!("profile {username} not found"))
}

fn violations_or_ok(violations: Vec<ConstraintViolation>) -> Result<(), Error> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::ConstraintViolations(violations).into())
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn find_profile_owner(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| profile_not_found(username))
    }

    async fn is_following(&self, viewer: &User, target: &User) -> Result<bool, Error> {
        let relation = self
            .users
            .find_relation(viewer.id(), target.id())
            .await
            .map_err(map_persistence_error)?;
        Ok(relation.is_some())
    }

    async fn registration_violations(
        &self,
        request: &RegisterUserRequest,
    ) -> Result<Vec<ConstraintViolation>, Error> {
        let root = type_name::<RegisterUserRequest>();
        let mut violations = Vec::new();

        if self
            .users
            .find_by_username(&request.username)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            let (code, message) = DUPLICATED_USERNAME;
            violations.push(ConstraintViolation::new(
                root,
                "register.param.username",
                code,
                message,
            ));
        }
        if self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            let (code, message) = DUPLICATED_EMAIL;
            violations.push(ConstraintViolation::new(
                root,
                "register.param.email",
                code,
                message,
            ));
        }
        Ok(violations)
    }

    async fn update_violations(
        &self,
        command: &UpdateUserCommand,
    ) -> Result<Vec<ConstraintViolation>, Error> {
        let root = type_name::<UpdateUserCommand>();
        let target_id = command.target_user().id();
        let mut violations = Vec::new();

        if let Some(email) = &command.param().email {
            let owner = self
                .users
                .find_by_email(email)
                .await
                .map_err(map_persistence_error)?;
            if owner.is_some_and(|owner| owner.id() != target_id) {
                violations.push(ConstraintViolation::new(
                    root,
                    "update_user.command.email",
                    UPDATE_USER_CONSTRAINT,
                    "email already exist",
                ));
            }
        }
        if let Some(username) = &command.param().username {
            let owner = self
                .users
                .find_by_username(username)
                .await
                .map_err(map_persistence_error)?;
            if owner.is_some_and(|owner| owner.id() != target_id) {
                violations.push(ConstraintViolation::new(
                    root,
                    "update_user.command.username",
                    UPDATE_USER_CONSTRAINT,
                    "username already exist",
                ));
            }
        }
        Ok(violations)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        violations_or_ok(self.registration_violations(&request).await?)?;

        let RegisterUserRequest {
            username,
            email,
            bio,
            image,
        } = request;
        let user = User::register(username, email)
            .with_bio(bio)
            .with_image(image);
        self.users.save(&user).await.map_err(map_persistence_error)?;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user)
    }

    async fn update_user(&self, command: UpdateUserCommand) -> Result<User, Error> {
        violations_or_ok(self.update_violations(&command).await?)?;

        let (mut user, changes) = command.into_parts();
        user.update(changes);
        self.users.save(&user).await.map_err(map_persistence_error)?;

        debug!(user_id = %user.id(), "updated user profile");
        Ok(user)
    }

    async fn follow(&self, follower: &User, username: &Username) -> Result<ProfileData, Error> {
        let target = self.find_profile_owner(username).await?;
        let relation = FollowRelation::new(follower.id().clone(), target.id().clone());
        if relation.is_self_follow() {
            let rejection = BindingErrors::new(type_name::<FollowRelation>()).with_rejection(
                "username",
                "SelfFollow",
                "cannot follow yourself",
            );
            return Err(ValidationFailure::InvalidRequest(rejection).into());
        }

        self.users
            .save_relation(&relation)
            .await
            .map_err(map_persistence_error)?;

        debug!(user_id = %follower.id(), target_id = %target.id(), "followed user");
        Ok(ProfileData::of(&target, true))
    }

    async fn unfollow(&self, follower: &User, username: &Username) -> Result<ProfileData, Error> {
        let target = self.find_profile_owner(username).await?;
        let relation = FollowRelation::new(follower.id().clone(), target.id().clone());

        self.users
            .remove_relation(&relation)
            .await
            .map_err(map_persistence_error)?;

        debug!(user_id = %follower.id(), target_id = %target.id(), "unfollowed user");
        Ok(ProfileData::of(&target, false))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_persistence_error)
    }

    async fn find_user_data(&self, id: &UserId) -> Result<Option<UserData>, Error> {
        let user = self.find_user(id).await?;
        Ok(user.as_ref().map(UserData::from))
    }

    async fn profile(
        &self,
        viewer: Option<&User>,
        username: &Username,
    ) -> Result<ProfileData, Error> {
        let owner = self.find_profile_owner(username).await?;
        let following = match viewer {
            Some(viewer) => self.is_following(viewer, &owner).await?,
            None => false,
        };
        Ok(ProfileData::of(&owner, following))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
