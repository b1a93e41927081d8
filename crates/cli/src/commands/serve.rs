//! `switchyard serve` — start the HTTP gateway.

use std::path::Path;

use tracing::info;

use switchyard_config::AppConfig;

pub async fn run(config_path: &Path, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting Switchyard gateway"
    );
    switchyard_gateway::start(config).await
}
