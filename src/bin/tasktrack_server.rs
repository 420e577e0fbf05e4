//! Starts the tasktrack HTTP server.
//!
//! Configuration comes from the environment (see [`tasktrack::config`]).
//! Log verbosity follows `RUST_LOG` and defaults to
//! `tasktrack=info,tower_http=info`.

use std::sync::Arc;

use mockable::DefaultClock;
use tasktrack::{
    api,
    config::Config,
    task::{adapters::postgres::PostgresTaskRepository, services::TaskLifecycleService},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tasktrack=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        host = %config.host,
        port = config.port,
        pool_size = config.pool_size,
        "loaded configuration"
    );

    let database_url = config.database_url.clone();
    let pool_size = config.pool_size;
    let repository = tokio::task::spawn_blocking(move || {
        PostgresTaskRepository::connect(&database_url, pool_size)
    })
    .await??;
    repository.ensure_schema().await?;
    info!("task schema ready");

    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    api::serve(&config.bind_address(), service).await?;
    Ok(())
}
