use std::process::ExitCode;

use passgate::core::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, bind_addr={}, bcrypt_cost={}",
        config.has_database(),
        config.bind_addr,
        config.bcrypt_cost
    );

    if let Err(e) = passgate::app::run(config).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
