//! Database repositories for passgate
//!
//! Repositories encapsulate the SQL for each table; [`PgCredentialStore`]
//! combines them behind the [`CredentialStore`](crate::core::db::CredentialStore) trait.

pub mod credentials;
pub mod log;
pub mod user;

pub use credentials::PgCredentialStore;
pub use log::LogRepository;
pub use user::UserRepository;
