use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use roster_lock::shared::infrastructure::clock::SystemClock;
use roster_lock::shared::infrastructure::league_data::in_memory::InMemoryLeagueData;
use roster_lock::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
use roster_lock::shell::config::Config;
use roster_lock::shell::seed::Seed;
use roster_lock::shell::state::AppState;
use roster_lock::shell::{http, workers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster_lock=info")))
        .init();

    let config = Config::from_env()?;

    let league = InMemoryLeagueData::new();
    if let Some(path) = &config.seed_path {
        Seed::load(path)?.apply(&league).await;
    }
    let state = AppState::new(
        Arc::new(InMemorySnapshotStore::new()),
        Arc::new(league),
        Arc::new(SystemClock::new(config.league_offset)),
        config.audit_options(),
    );

    workers::spawn_lock_worker(state.clone(), config.lock_interval);
    workers::spawn_backfill_worker(state.clone(), config.backfill_interval);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    axum::serve(listener, http::router(state)).await?;
    Ok(())
}
