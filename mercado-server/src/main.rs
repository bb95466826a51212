//! mercado-server: supermarket storefront backend
//!
//! Long-running service that:
//! - Serves the catalog (products, categories) and customer profiles
//! - Places orders transactionally with checked stock decrements
//! - Issues JWT tokens for registration and login

use mercado_server::{Config, ServerState, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenv::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mercado_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting mercado-server (env: {})", config.environment);

    // Initialize application state (opens the pool, applies migrations)
    let state = ServerState::initialize(&config).await?;

    let app = api::build_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("mercado-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
