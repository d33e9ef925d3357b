//! passgate - password-based authentication service
//!
//! User registration, login with bearer-token issuance and password change,
//! backed by PostgreSQL (or an in-memory store when no database is configured).

pub mod app;
pub mod core;
