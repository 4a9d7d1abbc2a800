use safeshelter_client::core::config::Config;
use safeshelter_client::features::animals::ShelterApiClient;
use safeshelter_client::features::console::Console;
use safeshelter_client::modules::terminal::Terminal;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // One operator at one prompt; a single thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");
    tracing::info!(
        "Shelter service at {} (reload policy: {:?})",
        config.api.collection_url(),
        config.store.reload_policy
    );

    let api = Arc::new(ShelterApiClient::new(config.api.clone()));
    let terminal = Arc::new(Terminal::stdio());
    let mut console = Console::new(config, api, terminal);
    tracing::info!("Console initialized");

    // Start with whatever the service has; a failure is reported at the prompt
    if let Err(e) = console.store().load().await {
        tracing::warn!("Initial load failed: {}", e);
    }

    console.run().await;

    Ok(())
}
