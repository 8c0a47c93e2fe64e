//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to resolve principals and read user and
//! profile views without importing outbound persistence concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserId, Username};

/// Account view returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub bio: String,
    pub image: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            username: user.username().to_string(),
            bio: user.bio().to_owned(),
            image: user.image().to_owned(),
        }
    }
}

/// Public view of a user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub username: String,
    pub bio: String,
    pub image: String,
    /// Whether the viewer follows this user; always `false` for anonymous
    /// viewers.
    pub following: bool,
}

impl ProfileData {
    /// Project `user` for a viewer with the given follow state.
    pub fn of(user: &User, following: bool) -> Self {
        Self {
            username: user.username().to_string(),
            bio: user.bio().to_owned(),
            image: user.image().to_owned(),
            following,
        }
    }
}

/// Domain use-case port for reading users and profiles.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch the full user record, used to resolve request principals.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Fetch the account view for `id`.
    async fn find_user_data(&self, id: &UserId) -> Result<Option<UserData>, Error>;

    /// Fetch the profile of `username` as seen by `viewer`.
    ///
    /// Fails with not-found when no such user exists.
    async fn profile(&self, viewer: Option<&User>, username: &Username)
    -> Result<ProfileData, Error>;
}
