use tracing_subscriber::EnvFilter;

use samaced_api::config::AppConfig;
use samaced_api::database::Database;
use samaced_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, JWT_SECRET, DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "samaced_api=debug,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    let db = Database::connect(&config.database_url).await?;
    db.init().await?;

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(db, config);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Samaced backend listening on http://{}", bind_addr);

    axum::serve(listener, samaced_api::app(state)).await?;
    Ok(())
}
