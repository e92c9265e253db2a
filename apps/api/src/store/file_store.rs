use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::store::ProfileStore;

/// A single JSON document mapping profile key → profile, the same shape as
/// the extension's own sync storage. A missing file is an empty store.
///
/// Writes are serialized by `write_lock` and land via rename, so a concurrent
/// reader sees either the old document or the new one.
pub struct FileProfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Sibling file the next document is written to before it replaces `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profiles.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_document(&self) -> Result<Map<String, Value>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get(&self, key: &str) -> Result<Option<Profile>, AppError> {
        let mut document = self.read_document().await?;
        match document.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, profile: &Profile) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.to_string(), serde_json::to_value(profile)?);
        let body = serde_json::to_string_pretty(&document)?;

        // Readers do not lock; the document is swapped in whole.
        let staging = self.staging_path();
        tokio::fs::write(&staging, body).await.map_err(|e| {
            AppError::Store(format!("failed to write {}: {e}", staging.display()))
        })?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|e| {
            AppError::Store(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        info!("Saved profile '{key}' to {}", self.path.display());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path().join("profiles.json"));
        assert!(store.get("profileData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path().join("profiles.json"));

        let mut first = Profile::default();
        first.basic.insert("name".to_string(), json!("Ann"));
        let mut second = Profile::default();
        second.basic.insert("name".to_string(), json!("Bo"));

        store.put("ann", &first).await.unwrap();
        store.put("bo", &second).await.unwrap();

        assert_eq!(store.get("ann").await.unwrap(), Some(first));
        assert_eq!(store.get("bo").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_reads_extension_shaped_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"{"profileData": {"basic": {"email": "ann@example.com"}, "experience": null}}"#,
        )
        .unwrap();

        let profile = FileProfileStore::new(&path)
            .get("profileData")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.basic.get("email"), Some(&json!("ann@example.com")));
        assert!(profile.experience.is_empty());
    }

    #[tokio::test]
    async fn test_reads_during_writes_see_whole_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileProfileStore::new(dir.path().join("profiles.json")));

        let mut profile = Profile::default();
        profile.basic.insert("summary".to_string(), json!("x".repeat(64 * 1024)));
        store.put("profileData", &profile).await.unwrap();

        let writer = {
            let store = Arc::clone(&store);
            let profile = profile.clone();
            tokio::spawn(async move {
                for _ in 0..20 {
                    store.put("profileData", &profile).await.unwrap();
                }
            })
        };
        for _ in 0..20 {
            let read = store.get("profileData").await;
            assert_eq!(read.unwrap().as_ref(), Some(&profile));
        }
        writer.await.unwrap();

        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(FileProfileStore::new(&path).get("profileData").await.is_err());
    }
}
