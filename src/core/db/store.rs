//! Credential store abstraction
//!
//! [`AuthService`](crate::core::auth::AuthService) only talks to persistence
//! through this trait, so the same flows run against PostgreSQL in
//! production and an in-memory map in tests.

use std::future::Future;

use uuid::Uuid;

use crate::core::db::models::{LogEntry, User};

/// Store-level errors, kept apart from domain errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error, lifting unique violations out of the generic case
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(db_err.message().to_string())
            }
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Persistence for users and their append-only log
pub trait CredentialStore: Send + Sync {
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn find_user_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Insert a user. `password_hash` must already be hashed.
    fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Replace a user's password hash; `NotFound` if the id is unknown
    fn update_user_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn append_log(
        &self,
        user_id: Uuid,
        description: &str,
    ) -> impl Future<Output = Result<LogEntry, StoreError>> + Send;
}
