//! In-memory credential store
//!
//! Backed by `DashMap`. Used by the test suite and as a fallback when no
//! `DATABASE_URL` is configured. Contents are lost on restart.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::db::models::{LogEntry, User};
use crate::core::db::store::{CredentialStore, StoreError};

#[derive(Default)]
struct MemoryState {
    users: DashMap<Uuid, User>,
    /// email -> user id, mirrors the unique index on `users.email`
    emails: DashMap<String, Uuid>,
    logs: RwLock<Vec<LogEntry>>,
}

/// Credential store that keeps everything in process memory
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    state: Arc<MemoryState>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    #[cfg(test)]
    pub fn user_count(&self) -> usize {
        self.state.users.len()
    }

    /// Log entries recorded for a user, oldest first
    #[cfg(test)]
    pub async fn logs_for_user(&self, user_id: Uuid) -> Vec<LogEntry> {
        self.state
            .logs
            .read()
            .await
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let id = self.state.emails.get(email).map(|entry| *entry.value());

        Ok(id.and_then(|id| self.state.users.get(&id).map(|user| user.clone())))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.users.get(&id).map(|user| user.clone()))
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let Entry::Vacant(slot) = self.state.emails.entry(email.to_string()) else {
            return Err(StoreError::UniqueViolation(format!(
                "email {} is already registered",
                email
            )));
        };

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        // Insert the row before publishing the email so lookups never see a dangling id
        self.state.users.insert(user.id, user.clone());
        slot.insert(user.id);

        Ok(user)
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut user = self.state.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn append_log(&self, user_id: Uuid, description: &str) -> Result<LogEntry, StoreError> {
        if !self.state.users.contains_key(&user_id) {
            return Err(StoreError::NotFound);
        }

        let entry = LogEntry {
            id: Uuid::new_v4(),
            user_id,
            description: description.to_string(),
            created_at: Utc::now(),
        };

        self.state.logs.write().await.push(entry.clone());

        Ok(entry)
    }
}
