//! Password hashing with bcrypt
//!
//! bcrypt is CPU bound; async callers should go through
//! [`PasswordHasher::hash_blocking`] and [`PasswordHasher::verify_blocking`],
//! which move the work onto tokio's blocking pool.
//!
//! bcrypt only reads the first 72 bytes of its input, so the password is
//! first reduced to a hex encoded SHA-256 digest (64 bytes). Every byte of
//! the password then affects the stored hash.

use sha2::{Digest, Sha256};

/// Default bcrypt cost factor for new hashes
pub const DEFAULT_BCRYPT_COST: u32 = 14;

/// Password hashing errors
#[derive(Debug, thiserror::Error)]
pub enum HashingError {
    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Salted password hasher with a fixed cost factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// The bcrypt cost used for new hashes
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (salt is generated per call)
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        Ok(bcrypt::hash(prehash(password), self.cost)?)
    }

    /// Verify a password against a bcrypt hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, HashingError> {
        Ok(bcrypt::verify(prehash(password), hash)?)
    }

    /// Hash on the blocking thread pool
    pub async fn hash_blocking(&self, password: &str) -> Result<String, HashingError> {
        let hasher = *self;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    /// Verify on the blocking thread pool
    pub async fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, HashingError> {
        let hasher = *self;
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await?
    }
}

fn prehash(password: &str) -> String {
    let mut digest = Sha256::new();
    digest.update(password.as_bytes());
    hex::encode(digest.finalize())
}
