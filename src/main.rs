//! Registry server binary
//!
//! Usage: `studentorg-server [config.yaml]`

use anyhow::{Context, Result};
use studentorg::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RegistryConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => RegistryConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(InMemoryRegistryStore::new());
    if config.seed_demo_data {
        seed_demo_data(store.as_ref()).await?;
    }

    ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store)
        .register_all_entities()
        .serve()
        .await
}
