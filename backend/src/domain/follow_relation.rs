//! Directed follow edge between two users.

use super::UserId;

/// `user_id` follows `target_id`.
///
/// Each `(user_id, target_id)` pair is stored at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FollowRelation {
    user_id: UserId,
    target_id: UserId,
}

impl FollowRelation {
    pub fn new(user_id: UserId, target_id: UserId) -> Self {
        Self { user_id, target_id }
    }

    /// The follower.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The user being followed.
    pub fn target_id(&self) -> &UserId {
        &self.target_id
    }

    /// Whether the edge points back at its own source.
    pub fn is_self_follow(&self) -> bool {
        self.user_id == self.target_id
    }
}
