//! OpenSASE Inventory - Self-hosted inventory administration

use std::sync::Arc;

use anyhow::Result;
use opensase_inventory::api::{self, AppState};
use opensase_inventory::config::Config;
use opensase_inventory::storage::FileStore;
use opensase_inventory::Inventory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = Config::from_env()?;
    let store = FileStore::open(&config.data_dir)?;
    tracing::info!(data_dir = %store.dir().display(), "Using file store");
    let inventory = Inventory::load(Arc::new(store), config.settings.clone());

    let nats = match config.nats_url.as_deref() {
        Some(url) => match async_nats::connect(url).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, url, "NATS unavailable, product events will not be published");
                None
            }
        },
        None => None,
    };

    let app = api::router(AppState::new(inventory, nats));
    tracing::info!("🚀 OpenSASE Inventory listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?, app).await?;
    Ok(())
}
