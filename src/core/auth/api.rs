//! Auth API endpoints
//!
//! - POST /api/users/register - Register a new user
//! - POST /api/users/login - Login and get a bearer token
//! - PUT /api/users/password - Change password (requires current password)
//! - GET /api/users/me - Get current user info

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::auth::{
    AuthError, AuthService, ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::core::db::models::UserResponse;
use crate::core::db::store::CredentialStore;

/// Auth API state containing the auth service
#[derive(Clone)]
pub struct AuthApiState<S> {
    pub auth_service: AuthService<S>,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AuthError::IncorrectPassword => (StatusCode::FORBIDDEN, "INCORRECT_PASSWORD"),
            AuthError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = match &self {
            AuthError::InternalError(detail) => {
                tracing::error!("Internal error: {}", detail);
                ApiError::new("Internal server error", code)
            }
            _ => ApiError::new(self.to_string(), code),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the auth API router
pub fn auth_api_router<S>(state: AuthApiState<S>) -> Router
where
    S: CredentialStore + Clone + 'static,
{
    let state = Arc::new(state);

    Router::new()
        .route("/api/users/register", post(register_handler::<S>))
        .route("/api/users/login", post(login_handler::<S>))
        .route("/api/users/password", put(change_password_handler::<S>))
        .route("/api/users/me", get(me_handler::<S>))
        .with_state(state)
}

/// POST /api/users/register
async fn register_handler<S: CredentialStore>(
    State(state): State<Arc<AuthApiState<S>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    let Json(request) = payload?;
    require_fields(&[
        ("name", &request.name),
        ("email", &request.email),
        ("password", &request.password),
    ])?;

    tracing::info!("Registration attempt for email: {}", request.email);

    let user = state.auth_service.register(request).await?;

    tracing::info!("User registered successfully: {}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/users/login
async fn login_handler<S: CredentialStore>(
    State(state): State<Arc<AuthApiState<S>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(request) = payload?;
    require_fields(&[("email", &request.email), ("password", &request.password)])?;

    tracing::info!("Login attempt for email: {}", request.email);

    let response = state.auth_service.login(request).await?;

    tracing::info!("User logged in successfully: {}", response.id);

    Ok(Json(response))
}

/// PUT /api/users/password
async fn change_password_handler<S: CredentialStore>(
    State(state): State<Arc<AuthApiState<S>>>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthError> {
    let Json(request) = payload?;
    require_fields(&[
        ("email", &request.email),
        ("password", &request.password),
        ("new_password", &request.new_password),
    ])?;

    let email = request.email.clone();
    state.auth_service.change_password(request).await?;

    tracing::info!("Password changed for email: {}", email);

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// GET /api/users/me
async fn me_handler<S: CredentialStore>(
    State(state): State<Arc<AuthApiState<S>>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, AuthError> {
    let token = extract_bearer_token(&headers)?;

    let user = state.auth_service.current_user(&token).await?;

    Ok(Json(user))
}

/// Reject requests with empty required fields, naming every empty one
fn require_fields(fields: &[(&str, &String)]) -> Result<(), AuthError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("Error: {} is required", name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(missing.join(" | ")))
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token.to_string())
}
