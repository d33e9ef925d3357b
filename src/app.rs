//! HTTP application assembly
//!
//! Picks the credential store from configuration, wires the services and
//! serves the router until Ctrl+C.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::auth::{AuthApiState, AuthService, JwtService, auth_api_router};
use crate::core::config::Config;
use crate::core::db::{
    CredentialStore, DbError, MemoryCredentialStore, PgCredentialStore,
    create_pool_with_migrations,
};

/// Errors that stop the server
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application router for a given auth service
pub fn build_app<S>(auth_service: AuthService<S>) -> Router
where
    S: CredentialStore + Clone + 'static,
{
    auth_api_router(AuthApiState { auth_service }).layer(TraceLayer::new_for_http())
}

/// Connect the configured store and serve until shutdown
pub async fn run(config: Config) -> Result<(), AppError> {
    let jwt_service = JwtService::new(config.jwt_config());
    let hasher = config.password_hasher();

    let listener = TcpListener::bind(&config.bind_addr).await?;

    match config.db_config() {
        Some(db_config) => {
            let pool = create_pool_with_migrations(&db_config).await?;
            let store = PgCredentialStore::new(pool);
            serve(listener, AuthService::new(store, hasher, jwt_service)).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory credential store");
            let store = MemoryCredentialStore::new();
            serve(listener, AuthService::new(store, hasher, jwt_service)).await
        }
    }
}

async fn serve<S>(listener: TcpListener, auth_service: AuthService<S>) -> Result<(), AppError>
where
    S: CredentialStore + Clone + 'static,
{
    let app = build_app(auth_service);

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
