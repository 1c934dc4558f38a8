use anyhow::Context;
use tokio::net::TcpListener;

use foliofront::api::ApiClient;
use foliofront::config::AppConfig;
use foliofront::logging::{self, LoggingConfig};
use foliofront::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;
    let bind_addr = config.bind_addr;

    let api = ApiClient::new(&config).context("invalid API_BASE_URL")?;
    tracing::info!("📡 Backend API at {}", config.api_base_url);

    let state = AppState::new(config, api);
    let app = foliofront::app::create_app(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 foliofront running at http://{}/", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
