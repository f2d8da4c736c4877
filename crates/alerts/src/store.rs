//! Durable storage for the set of already-notified deal ids.
//!
//! The whole set lives in a single JSON blob (a list of id strings). It is
//! read once at the start of a run and overwritten as a whole at the end;
//! there is no per-id update and no concurrency check. The path usually
//! points into a mounted bucket or volume.

use dealwatch_core::SeenSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read seen set: {0}")]
    Read(io::Error),

    #[error("failed to write seen set: {0}")]
    Write(io::Error),

    #[error("seen set blob is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed store for the [`SeenSet`] blob.
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the seen set. A missing blob means this is the first run and
    /// yields an empty set; any other read failure is an error.
    pub async fn load(&self) -> Result<SeenSet, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let seen: SeenSet = serde_json::from_slice(&bytes)?;
                debug!(count = seen.len(), "Loaded seen set");
                Ok(seen)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No seen set blob yet, starting empty");
                Ok(SeenSet::new())
            }
            Err(err) => Err(StoreError::Read(err)),
        }
    }

    /// Overwrite the stored blob with the given set.
    ///
    /// Writes to a sibling temp file and renames it over the blob so a
    /// crashed run never leaves a half-written set behind.
    pub async fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(seen)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(StoreError::Write)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::Write)?;

        info!(count = seen.len(), path = %self.path.display(), "Saved seen set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_missing_blob_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("seen_deals.json"));

        let seen = store.load().await.unwrap();
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("seen_deals.json"));

        let seen: SeenSet = ["A1".to_string(), "A2".to_string()].into_iter().collect();
        store.save(&seen).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, seen);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("seen_deals.json"));

        let first: SeenSet = ["A1".to_string()].into_iter().collect();
        store.save(&first).await.unwrap();

        let second: SeenSet = ["B1".to_string(), "B2".to_string()].into_iter().collect();
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, second);
        assert!(!loaded.contains("A1"));
    }

    #[tokio::test]
    async fn test_load_corrupt_blob_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen_deals.json");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let store = SeenStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_save_to_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("no-such-dir").join("seen_deals.json"));

        let seen: SeenSet = ["A1".to_string()].into_iter().collect();
        let err = store.save(&seen).await.unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));
    }
}
