use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

/// GET /api/v1/profiles/:key
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .store
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile '{key}' not found")))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/:key
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(profile): Json<Profile>,
) -> Result<StatusCode, AppError> {
    if key.trim().is_empty() {
        return Err(AppError::Validation("Profile key must not be empty".to_string()));
    }
    state.store.put(&key, &profile).await?;
    Ok(StatusCode::NO_CONTENT)
}
