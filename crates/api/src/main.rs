//! MoodMusic - Main Entry Point

use api::config::AppConfig;
use api::{init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== MoodMusic v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load();
    run_server(config).await?;

    Ok(())
}
