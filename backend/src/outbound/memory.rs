//! In-memory user repository.
//!
//! Backs the user port with `HashMap`/`HashSet` state guarded by a
//! `tokio::sync::RwLock`. Used when no database URL is configured and in
//! tests. State is lost when the process exits.
//!
//! The adapter enforces the same uniqueness rules as the relational schema: a
//! username or email held by a different id is rejected with
//! [`UserPersistenceError::UniqueViolation`].

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, FollowRelation, User, UserId, Username};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    follows: HashSet<FollowRelation>,
}

impl State {
    fn conflicting_column(&self, candidate: &User) -> Option<&'static str> {
        self.users
            .values()
            .filter(|user| user.id() != candidate.id())
            .find_map(|user| {
                if user.username() == candidate.username() {
                    Some("username")
                } else if user.email() == candidate.email() {
                    Some("email")
                } else {
                    None
                }
            })
    }
}

/// Process-local [`UserRepository`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of stored follow relations.
    pub async fn relation_count(&self) -> usize {
        self.state.read().await.follows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.state.write().await;
        if let Some(column) = state.conflicting_column(user) {
            return Err(UserPersistenceError::unique_violation(format!(
                "{column} already taken by another user"
            )));
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn save_relation(&self, relation: &FollowRelation) -> Result<(), UserPersistenceError> {
        self.state.write().await.follows.insert(relation.clone());
        Ok(())
    }

    async fn find_relation(
        &self,
        user_id: &UserId,
        target_id: &UserId,
    ) -> Result<Option<FollowRelation>, UserPersistenceError> {
        let probe = FollowRelation::new(user_id.clone(), target_id.clone());
        Ok(self.state.read().await.follows.get(&probe).cloned())
    }

    async fn remove_relation(
        &self,
        relation: &FollowRelation,
    ) -> Result<(), UserPersistenceError> {
        self.state.write().await.follows.remove(relation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for uniqueness enforcement; behavioural coverage lives
    //! in `tests/memory_repository.rs`.
    use super::*;
    use rstest::rstest;

    fn user(id: &str, username: &str, email: &str) -> User {
        User::try_from_strings(id, username, email).expect("fixture user is valid")
    }

    #[rstest]
    #[case(user("other", "jake", "other@example.com"), "username")]
    #[case(user("other", "other", "jake@jake.jake"), "email")]
    #[tokio::test]
    async fn save_rejects_columns_held_by_another_id(
        #[case] intruder: User,
        #[case] column: &str,
    ) {
        let repo = InMemoryUserRepository::new();
        repo.save(&user("jake-id", "jake", "jake@jake.jake"))
            .await
            .expect("first save succeeds");

        let error = repo.save(&intruder).await.expect_err("conflict");
        assert_eq!(
            error,
            UserPersistenceError::unique_violation(format!("{column} already taken by another user"))
        );
        assert_eq!(repo.user_count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn save_allows_a_user_to_keep_its_own_values() {
        let repo = InMemoryUserRepository::new();
        let jake = user("jake-id", "jake", "jake@jake.jake");
        repo.save(&jake).await.expect("insert");
        repo.save(&jake.clone().with_bio("updated"))
            .await
            .expect("update in place");

        let stored = repo
            .find_by_id(jake.id())
            .await
            .expect("lookup")
            .expect("stored user");
        assert_eq!(stored.bio(), "updated");
    }
}
