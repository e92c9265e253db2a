use std::sync::Arc;

use crate::config::Config;
use crate::fill::FillEngine;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile backend. Selected via PROFILE_STORE.
    pub store: Arc<dyn ProfileStore>,
    /// Immutable after startup; every request runs its own pass against it.
    pub engine: Arc<FillEngine>,
    pub config: Config,
}
