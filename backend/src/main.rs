//! Backend entry-point: reads configuration from the environment, selects the
//! user repository and serves the `/api` endpoints.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use conduit_backend::inbound::http::health::HealthState;
use conduit_backend::outbound::persistence::{DEFAULT_MAX_SIZE, DbPool, PoolConfig};
use server::{ServerConfig, create_server};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = bind_addr()?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    if let Some(pool) = database_pool().await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path = env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_SESSION_KEY_FILE.into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn bind_addr() -> std::io::Result<SocketAddr> {
    let raw = env::var("CONDUIT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    raw.parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid CONDUIT_BIND_ADDR {raw:?}: {e}"),
        )
    })
}

/// Build the PostgreSQL pool when `DATABASE_URL` is set.
async fn database_pool() -> std::io::Result<Option<DbPool>> {
    let Ok(url) = env::var("DATABASE_URL") else {
        info!("DATABASE_URL unset; users are kept in memory");
        return Ok(None);
    };
    let max_size = match env::var("DB_POOL_MAX_SIZE") {
        Ok(raw) => raw.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid DB_POOL_MAX_SIZE {raw:?}: {e}"),
            )
        })?,
        Err(_) => DEFAULT_MAX_SIZE,
    };
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
    Ok(Some(pool))
}
