use std::io;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ArtifactId;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist a synthesized response under the given id and mark it as the
    /// most recent one.
    async fn store(&self, id: ArtifactId, data: Vec<u8>) -> Result<(), ArtifactStoreError>;

    async fn fetch(&self, id: ArtifactId) -> Result<Vec<u8>, ArtifactStoreError>;

    /// The most recently stored artifact. `NotFound` until the first `store`
    /// after startup.
    async fn latest(&self) -> Result<Vec<u8>, ArtifactStoreError>;

    /// Delete artifacts last written before the cutoff. Returns how many were
    /// removed.
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, ArtifactStoreError>;

    /// Delete every stored artifact.
    async fn clear(&self) -> Result<(), ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
