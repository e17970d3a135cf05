//! Shiftdesk Server binary.
//!
//! Reads the config path from the first argument or `SHIFTDESK_CONFIG`;
//! runs with defaults when neither is set.

use shiftdesk_server::{load_config, PlatformConfig, PlatformServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).or_else(|| std::env::var("SHIFTDESK_CONFIG").ok());
    let config = match &path {
        Some(path) => load_config(path)?,
        None => PlatformConfig::default(),
    };

    let level: tracing::Level = config.server.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
    if let Some(path) = &path {
        tracing::info!(%path, "configuration loaded");
    }

    let server = PlatformServer::new(config).await?;
    server.run().await?;

    Ok(())
}
