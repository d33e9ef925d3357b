//! Authentication module for passgate
//!
//! This module provides:
//! - Password policy validation
//! - bcrypt password hashing
//! - JWT bearer token issuing and validation
//! - Registration, login and password change flows
//! - REST API endpoints for those flows

pub mod api;
pub mod hashing;
pub mod jwt;
pub mod policy;
pub mod service;

pub use api::{AuthApiState, auth_api_router};
pub use hashing::{DEFAULT_BCRYPT_COST, HashingError, PasswordHasher};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use policy::{PasswordViolation, join_violations, validate_password};
pub use service::{
    AuthError, AuthService, ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
};
