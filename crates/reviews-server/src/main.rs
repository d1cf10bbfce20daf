use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::{nats, InMemoryReviewRepository, NatsProductClient, PgReviewRepository};
use application::ReviewService;
use config::Config;
use reviews::ReviewRepository;

/// Application service with the NATS product client
pub type AppReviewService<R> = ReviewService<R, NatsProductClient>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("⭐ Reviews service initializing...");

    let config = Config::from_env()?;

    let client = async_nats::ConnectOptions::new()
        .name("reviews-ms")
        .request_timeout(Some(config.nats_request_timeout))
        .connect(config.nats_servers.as_str())
        .await
        .with_context(|| format!("Failed to connect to NATS at {}", config.nats_servers))?;

    tracing::info!("📡 Connected to NATS: {}", config.nats_servers);

    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .context("Failed to connect to Postgres")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("✅ Database migrations completed");

            run(Arc::new(PgReviewRepository::new(pool)), client, &config).await
        }
        None => {
            tracing::warn!("⚠️  No DATABASE_URL set - using in-memory review store");
            run(Arc::new(InMemoryReviewRepository::new()), client, &config).await
        }
    }
}

async fn run<R: ReviewRepository + 'static>(
    repo: Arc<R>,
    client: async_nats::Client,
    config: &Config,
) -> anyhow::Result<()> {
    let products = Arc::new(NatsProductClient::new(client.clone()));
    let service: Arc<AppReviewService<R>> = Arc::new(ReviewService::new(repo, products));

    tracing::info!("✅ Reviews service ready");

    tokio::select! {
        result = nats::listen(client.clone(), service, config.nats_queue_group.clone()) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("🛑 Shutdown signal received"),
    }

    client
        .flush()
        .await
        .context("Failed to flush NATS connection")?;

    Ok(())
}
