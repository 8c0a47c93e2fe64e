//! PostgreSQL persistence adapter using Diesel.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are internal
//! to this module; only the repository, the pool and their configuration are
//! exported.
//!
//! # Example
//!
//! ```no_run
//! use conduit_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), conduit_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/conduit")).await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
