//! Profile store: where the extension's saved profile lives.
//!
//! The fill engine only ever reads through `load_profile_or_empty`, which turns
//! every failure into an empty profile. Backends are swapped at startup via
//! `PROFILE_STORE` and carried in `AppState` as `Arc<dyn ProfileStore>`.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::models::profile::Profile;

pub mod file_store;
pub mod handlers;
pub mod memory_store;
pub mod redis_store;

pub use file_store::FileProfileStore;
pub use memory_store::MemoryProfileStore;
pub use redis_store::RedisProfileStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Profile>, AppError>;

    async fn put(&self, key: &str, profile: &Profile) -> Result<(), AppError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

/// Fetches `key`, substituting an empty profile when it is absent or the
/// store fails.
pub async fn load_profile_or_empty(store: &dyn ProfileStore, key: &str) -> Profile {
    match store.get(key).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            warn!(key, backend = store.backend(), "No stored profile; filling with empty profile");
            Profile::default()
        }
        Err(e) => {
            warn!(key, backend = store.backend(), error = %e, "Profile fetch failed; filling with empty profile");
            Profile::default()
        }
    }
}
