//! PostgreSQL-backed [`CredentialStore`]

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::{LogEntry, User};
use crate::core::db::repositories::{LogRepository, UserRepository};
use crate::core::db::store::{CredentialStore, StoreError};

/// Credential store over the `users` and `logs` tables
#[derive(Clone)]
pub struct PgCredentialStore {
    users: UserRepository,
    logs: LogRepository,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            logs: LogRepository::new(pool),
        }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.users.find_by_email(email).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.users.find_by_id(id).await
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        self.users.create(name, email, password_hash).await
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.users.update_password_hash(id, password_hash).await
    }

    async fn append_log(&self, user_id: Uuid, description: &str) -> Result<LogEntry, StoreError> {
        self.logs.append(user_id, description).await
    }
}
