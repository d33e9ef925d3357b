//! Authentication service
//!
//! Business logic for registration, login and password change. Coordinates
//! the password policy, the bcrypt hasher, the JWT service and a
//! [`CredentialStore`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::auth::hashing::{HashingError, PasswordHasher};
use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::auth::policy::{join_violations, validate_password};
use crate::core::db::models::{FAILED_LOGIN_DESCRIPTION, PASSWORD_CHANGED_DESCRIPTION, UserResponse};
use crate::core::db::store::{CredentialStore, StoreError};

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Malformed input or weak password; carries every message at once
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password on login. Both cases share this
    /// message so clients cannot probe which emails are registered.
    #[error("Email/password not found")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect current password")]
    IncorrectPassword,

    #[error("User could not be created: {0}")]
    Conflict(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(message) => AuthError::Conflict(message),
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

impl From<HashingError> for AuthError {
    fn from(err: HashingError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(alias = "passwd")]
    pub password: String,
}

/// Login request data
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(alias = "passwd")]
    pub password: String,
}

/// Password change request data
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    /// Current password
    #[serde(alias = "passwd")]
    pub password: String,
    #[serde(alias = "newpasswd")]
    pub new_password: String,
}

/// Successful login: public user fields plus a bearer token
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
    hasher: PasswordHasher,
    jwt_service: JwtService,
}

impl<S: CredentialStore> AuthService<S> {
    /// Create a new authentication service
    pub fn new(store: S, hasher: PasswordHasher, jwt_service: JwtService) -> Self {
        Self {
            store,
            hasher,
            jwt_service,
        }
    }

    /// The underlying credential store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reject passwords that violate the policy, reporting every violation
    fn check_password_policy(password: &str) -> Result<(), AuthError> {
        let violations = validate_password(password);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Validation(join_violations(&violations)))
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AuthError> {
        Self::check_password_policy(&request.password)?;

        let password_hash = self.hasher.hash_blocking(&request.password).await?;

        let user = self
            .store
            .create_user(&request.name, &request.email, &password_hash)
            .await?;

        Ok(user.into())
    }

    /// Login an existing user and issue a bearer token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .store
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = self
            .hasher
            .verify_blocking(&request.password, &user.password_hash)
            .await?;

        if !is_valid {
            self.store
                .append_log(user.id, FAILED_LOGIN_DESCRIPTION)
                .await?;
            tracing::warn!(user_id = %user.id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.issue_token(user.id, &user.name)?;

        Ok(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), AuthError> {
        let user = self
            .store
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let is_valid = self
            .hasher
            .verify_blocking(&request.password, &user.password_hash)
            .await?;

        if !is_valid {
            return Err(AuthError::IncorrectPassword);
        }

        Self::check_password_policy(&request.new_password)?;

        let password_hash = self.hasher.hash_blocking(&request.new_password).await?;

        self.store
            .update_user_password(user.id, &password_hash)
            .await?;

        self.store
            .append_log(user.id, PASSWORD_CHANGED_DESCRIPTION)
            .await?;

        Ok(())
    }

    /// Resolve the user a bearer token was issued for
    pub async fn current_user(&self, token: &str) -> Result<UserResponse, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;

        let user = self
            .store
            .find_user_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.into())
    }
}
