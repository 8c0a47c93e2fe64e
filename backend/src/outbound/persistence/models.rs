//! Diesel row types for the user store.
//!
//! These types never leave the persistence adapter; conversions into domain
//! values validate every column.

use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{FollowRelation, User, UserId};

use super::schema::{follows, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub image: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserPersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            id,
            username,
            email,
            bio,
            image,
        } = row;
        let user = Self::try_from_strings(id, username, email).map_err(|err| {
            UserPersistenceError::query(format!("stored user row is invalid: {err}"))
        })?;
        Ok(user.with_bio(bio).with_image(image))
    }
}

/// Insertable row for `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub bio: &'a str,
    pub image: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            bio: user.bio(),
            image: user.image(),
        }
    }
}

/// Mutable columns written when an upsert hits an existing id.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub bio: &'a str,
    pub image: &'a str,
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            bio: user.bio(),
            image: user.image(),
        }
    }
}

/// Row of `follows`, used for reads and inserts alike.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FollowRow {
    pub user_id: String,
    pub target_id: String,
}

impl From<&FollowRelation> for FollowRow {
    fn from(relation: &FollowRelation) -> Self {
        Self {
            user_id: relation.user_id().to_string(),
            target_id: relation.target_id().to_string(),
        }
    }
}

impl TryFrom<FollowRow> for FollowRelation {
    type Error = UserPersistenceError;

    fn try_from(row: FollowRow) -> Result<Self, Self::Error> {
        let to_id = |raw: String| {
            UserId::new(raw).map_err(|err| {
                UserPersistenceError::query(format!("stored follow row is invalid: {err}"))
            })
        };
        Ok(Self::new(to_id(row.user_id)?, to_id(row.target_id)?))
    }
}

