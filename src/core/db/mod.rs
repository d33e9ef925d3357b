//! Database module for passgate
//!
//! Connectivity, models, the [`CredentialStore`] trait and its PostgreSQL and
//! in-memory implementations.

pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod store;

pub use memory::MemoryCredentialStore;
pub use models::*;
pub use pool::{DbConfig, DbError, create_pool, create_pool_with_migrations};
pub use repositories::{LogRepository, PgCredentialStore, UserRepository};
pub use store::{CredentialStore, StoreError};

pub use sqlx::PgPool;
