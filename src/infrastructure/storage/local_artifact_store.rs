use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tokio::sync::RwLock;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::ArtifactId;

/// Filesystem-backed store for synthesized responses. Artifacts are written
/// once under `{id}.mp3` and never rewritten; only the in-memory pointer to
/// the most recent one moves. Overlapping requests race on the pointer, not
/// on file contents.
pub struct LocalArtifactStore {
    inner: Arc<LocalFileSystem>,
    latest: RwLock<Option<ArtifactId>>,
}

impl LocalArtifactStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ArtifactStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            latest: RwLock::new(None),
        })
    }

    fn object_path(id: ArtifactId) -> StorePath {
        StorePath::from(format!("{}.mp3", id.as_uuid()))
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(&self, id: ArtifactId, data: Vec<u8>) -> Result<(), ArtifactStoreError> {
        let path = Self::object_path(id);
        self.inner
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;

        *self.latest.write().await = Some(id);
        Ok(())
    }

    async fn fetch(&self, id: ArtifactId) -> Result<Vec<u8>, ArtifactStoreError> {
        let path = Self::object_path(id);
        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                ArtifactStoreError::NotFound(id.as_uuid().to_string())
            }
            e => ArtifactStoreError::ReadFailed(e.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn latest(&self) -> Result<Vec<u8>, ArtifactStoreError> {
        let current = *self.latest.read().await;
        match current {
            Some(id) => self.fetch(id).await,
            None => Err(ArtifactStoreError::NotFound(
                "no synthesized audio stored yet".to_string(),
            )),
        }
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, ArtifactStoreError> {
        let mut listing = self.inner.list(None);
        let mut expired: Vec<StorePath> = Vec::new();

        while let Some(meta) = listing
            .try_next()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?
        {
            if meta.last_modified < cutoff {
                expired.push(meta.location);
            }
        }

        let current = *self.latest.read().await;
        let mut purged = 0usize;

        for location in expired {
            self.inner
                .delete(&location)
                .await
                .map_err(|e| ArtifactStoreError::DeleteFailed(e.to_string()))?;
            purged += 1;

            if let Some(id) = current {
                if location == Self::object_path(id) {
                    *self.latest.write().await = None;
                }
            }
        }

        Ok(purged)
    }

    async fn clear(&self) -> Result<(), ArtifactStoreError> {
        let locations: Vec<StorePath> = self
            .inner
            .list(None)
            .map_ok(|meta| meta.location)
            .try_collect()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        for location in &locations {
            self.inner
                .delete(location)
                .await
                .map_err(|e| ArtifactStoreError::DeleteFailed(e.to_string()))?;
        }

        *self.latest.write().await = None;

        if !locations.is_empty() {
            tracing::info!(removed = locations.len(), "Cleared stored audio artifacts");
        }

        Ok(())
    }
}
