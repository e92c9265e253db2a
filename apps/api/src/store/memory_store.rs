use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::store::ProfileStore;

/// Process-local store. Default backend for development and tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, key: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, profile: &Profile) -> Result<(), AppError> {
        self.profiles
            .write()
            .await
            .insert(key.to_string(), profile.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
