//! # nscache Probe
//!
//! Binary entry point that checks a namespaced Redis cache end to end: it
//! writes a short-lived probe value and reads it back.

mod config;

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use nscache::{RedisStore, Store};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(version = nscache::VERSION, "Starting nscache probe");

    tracing::info!(
        address = %config.redis.address,
        namespace = %config.redis.namespace,
        cluster_mode = !config.redis.disable_cluster_mode,
        tls = !config.redis.disable_tls,
        "Connecting to Redis"
    );

    let store = RedisStore::from_config(&config.redis)
        .await
        .context("connecting to Redis")?;
    tracing::info!("Redis connected");

    let key = format!("probe:{}", Uuid::new_v4());
    let value = Uuid::new_v4().to_string();

    store
        .set(&key, &value, config.probe_ttl)
        .await
        .context("writing probe value")?;

    let read_back = store.get(&key).await.context("reading probe value")?;
    if read_back != value {
        bail!("probe value mismatch under key {}", store.namespace_key(&key));
    }

    tracing::info!(
        key = %store.namespace_key(&key),
        ttl_secs = config.probe_ttl.as_secs(),
        "Probe round trip succeeded"
    );

    Ok(())
}
