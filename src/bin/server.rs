//! fest-schedule HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin fest-schedule-server
//! ```
//!
//! # Configuration
//!
//! `fest-schedule.toml` or `config/fest-schedule.toml` (optional, see
//! [`fest_schedule::config`]).
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `FEST_SCHEDULE_CONFIG`: explicit config file path
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fest_schedule::catalog::{CatalogSeed, InMemoryCatalog};
use fest_schedule::config::AppConfig;
use fest_schedule::http::{create_router, AppState};
use fest_schedule::scheduler::ScheduleStore;
use fest_schedule::timeline::TimelineProjector;
use fest_schedule::validation::validate_seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting fest-schedule HTTP server");

    let config = match env::var("FEST_SCHEDULE_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::from_default_location()?,
    }
    .with_env_overrides()?;

    let catalog = match &config.catalog.seed_path {
        Some(path) => {
            let seed = CatalogSeed::from_file(path)?;
            if let Err(errors) = validate_seed(&seed) {
                for error in &errors {
                    warn!(%error, "catalog seed issue");
                }
                anyhow::bail!("catalog seed {} has {} issue(s)", path.display(), errors.len());
            }
            info!(
                venues = seed.venues.len(),
                works = seed.works.len(),
                groups = seed.groups.len(),
                "Catalog loaded from {}",
                path.display()
            );
            InMemoryCatalog::from_seed(seed)
        }
        None => {
            warn!("No catalog seed configured; starting with an empty catalog");
            InMemoryCatalog::new()
        }
    };

    let window = config.timeline.window()?;
    let store = Arc::new(ScheduleStore::new(Arc::new(catalog)));
    let state = AppState::new(store, TimelineProjector::new(window));
    let app = create_router(state);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
