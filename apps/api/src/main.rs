mod config;
mod errors;
mod fill;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::fill::{default_synonyms, FillEngine, KeyMatcher, SynonymTable};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileProfileStore, MemoryProfileStore, ProfileStore, RedisProfileStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing backend settings)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FormFill API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize profile store
    let store = build_store(&config)?;
    info!("Profile store initialized (backend: {})", store.backend());

    // Initialize synonym table and fill engine
    let synonyms = match &config.synonyms_file {
        Some(path) => SynonymTable::from_file(path)
            .with_context(|| format!("failed to load SYNONYMS_FILE {}", path.display()))?,
        None => default_synonyms(),
    };
    if synonyms.is_empty() {
        warn!("Synonym table is empty; only literal key names will match");
    }
    info!("Synonym table loaded ({} keys)", synonyms.len());
    let engine = Arc::new(FillEngine::new(KeyMatcher::new(synonyms)));

    // Build app state
    let state = AppState {
        store,
        engine,
        config: config.clone(),
    };

    // Build router; the extension calls from its own origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the profile store selected by PROFILE_STORE.
fn build_store(config: &Config) -> Result<Arc<dyn ProfileStore>> {
    let store: Arc<dyn ProfileStore> = match &config.store {
        StoreBackend::Memory => Arc::new(MemoryProfileStore::default()),
        StoreBackend::File(path) => Arc::new(FileProfileStore::new(path.clone())),
        StoreBackend::Redis(url) => {
            let client = redis::Client::open(url.as_str()).context("invalid REDIS_URL")?;
            Arc::new(RedisProfileStore::new(client))
        }
    };
    Ok(store)
}
