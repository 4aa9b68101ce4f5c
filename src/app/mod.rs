use crate::api::ApiServer;
use crate::config::{Config, Secrets};
use anyhow::Result;
use tracing::info;

pub async fn run_service() -> Result<()> {
    info!("Starting Hire-Genix Meet agent service");

    let config = Config::load()?;
    let secrets = Secrets::from_env();
    secrets.report();

    let api_server = ApiServer::new(&config, secrets);

    info!("Service is ready");
    info!(
        "Test manually: curl http://127.0.0.1:{}/api/credentials",
        config.server.port
    );

    api_server.start().await
}
