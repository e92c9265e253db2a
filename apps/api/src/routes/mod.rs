pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::fill::handlers as fill_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extension messages (fillForm, detectForms)
        .route("/api/v1/messages", post(fill_handlers::handle_message))
        // Profile store
        .route(
            "/api/v1/profiles/:key",
            get(store_handlers::handle_get_profile).put(store_handlers::handle_put_profile),
        )
        .with_state(state)
}
