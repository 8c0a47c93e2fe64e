//! Builders for the HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use conduit_backend::domain::ports::UserRepository;
use conduit_backend::inbound::http::state::HttpState;
use conduit_backend::outbound::memory::InMemoryUserRepository;
use conduit_backend::outbound::persistence::{DbPool, DieselUserRepository};

use super::ServerConfig;

/// Select the user repository: PostgreSQL when a pool is configured,
/// otherwise an in-process store that is lost on restart.
fn build_user_repository(pool: Option<&DbPool>) -> Arc<dyn UserRepository> {
    match pool {
        Some(pool) => {
            info!(storage = "postgres", "user repository selected");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            info!(storage = "memory", "user repository selected");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the shared HTTP state from the configured storage.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = build_user_repository(config.db_pool.as_ref());
    web::Data::new(HttpState::from_repository(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use conduit_backend::domain::{Email, User, UserId, Username};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn missing_pool_selects_in_memory_repository() {
        let repository = build_user_repository(None);
        let user = User::new(
            UserId::new("u1").expect("id"),
            Username::new("jake").expect("username"),
            Email::new("jake@jake.jake").expect("email"),
        );

        repository.save(&user).await.expect("save");
        let found = repository
            .find_by_username(user.username())
            .await
            .expect("lookup");
        assert_eq!(found, Some(user));
    }

    #[rstest]
    #[tokio::test]
    async fn state_without_pool_serves_queries() {
        let addr = "127.0.0.1:0".parse().expect("socket address");
        let config = ServerConfig::new(Key::generate(), false, SameSite::Lax, addr);
        let state = build_http_state(&config);

        let missing = state
            .users_query
            .find_user(&UserId::new("nobody").expect("id"))
            .await
            .expect("query");
        assert!(missing.is_none());
    }
}
