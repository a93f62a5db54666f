use anyhow::Context;
use s3bridge_api::setup;
use s3bridge_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration (config.yaml / CONFIG_FILE, then environment overrides)
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize the application (telemetry, storage, routes)
    let (_state, router) = setup::initialize_app(&config)?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
