//! PostgreSQL-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, FollowRelation, User, UserId, Username};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FollowRow, NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::{follows, users};

/// Load at most one user row matching `$filter` and convert it.
macro_rules! find_user_where {
    ($self:ident, $filter:expr) => {{
        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter($filter)
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }};
}

/// Diesel-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .on_conflict(users::id)
            .do_update()
            .set(UserUpdate::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        find_user_where!(self, users::id.eq(id.as_ref()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        find_user_where!(self, users::username.eq(username.as_ref()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        find_user_where!(self, users::email.eq(email.as_ref()))
    }

    async fn save_relation(&self, relation: &FollowRelation) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(follows::table)
            .values(FollowRow::from(relation))
            .on_conflict((follows::user_id, follows::target_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_relation(
        &self,
        user_id: &UserId,
        target_id: &UserId,
    ) -> Result<Option<FollowRelation>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = follows::table
            .filter(
                follows::user_id
                    .eq(user_id.as_ref())
                    .and(follows::target_id.eq(target_id.as_ref())),
            )
            .select(FollowRow::as_select())
            .first::<FollowRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(FollowRelation::try_from).transpose()
    }

    async fn remove_relation(
        &self,
        relation: &FollowRelation,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            follows::table.filter(
                follows::user_id
                    .eq(relation.user_id().as_ref())
                    .and(follows::target_id.eq(relation.target_id().as_ref())),
            ),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }
}
