//! Optional on-disk mirror of the processed-id set.
//!
//! Lets a restarted session remember which notifications already produced
//! rewards while the backend acknowledgement is still pending or failed.

use std::path::{Path, PathBuf};

use tracing;

use bunny_core::error::AppError;
use bunny_core::result::AppResult;
use bunny_core::types::NotificationId;

use super::dedup::ProcessedIds;

/// JSON file holding the processed notification ids.
#[derive(Debug, Clone)]
pub struct ProcessedIdStore {
    path: PathBuf,
}

impl ProcessedIdStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load previously processed ids. A missing file yields an empty set.
    pub async fn load(&self) -> AppResult<ProcessedIds> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No processed-id state at '{}', starting empty",
                    self.path.display()
                );
                return Ok(ProcessedIds::new());
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read processed-id state '{}': {e}",
                    self.path.display()
                )));
            }
        };

        let ids: Vec<NotificationId> = serde_json::from_slice(&bytes)?;
        tracing::info!(
            "Loaded {} processed notification ids from '{}'",
            ids.len(),
            self.path.display()
        );
        Ok(ProcessedIds::from_ids(ids))
    }

    /// Rewrite the file with the current set.
    ///
    /// Writes to a sibling temp file first so a crash never leaves a
    /// truncated state file behind.
    pub async fn save(&self, ids: &ProcessedIds) -> AppResult<()> {
        let json = serde_json::to_vec(&ids.snapshot())?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bunny-rewards-{}-{name}", std::process::id()))
            .join("processed.json")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let store = ProcessedIdStore::new(temp_path("missing"));
        let ids = store.load().await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_path("save");
        let store = ProcessedIdStore::new(&path);
        let ids = ProcessedIds::from_ids([NotificationId(7), NotificationId(2)]);
        store.save(&ids).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.snapshot(), vec![NotificationId(2), NotificationId(7)]);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"not json").await.unwrap();

        let err = ProcessedIdStore::new(&path).load().await.unwrap_err();
        assert_eq!(err.kind, bunny_core::error::ErrorKind::Serialization);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
