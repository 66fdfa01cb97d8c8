use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::ports::ArtifactStore;

/// Periodically deletes synthesized responses older than the retention
/// window. Runs until the process exits.
pub struct RetentionWorker {
    artifact_store: Arc<dyn ArtifactStore>,
    retention: chrono::Duration,
    sweep_interval: Duration,
}

impl RetentionWorker {
    pub fn new(
        artifact_store: Arc<dyn ArtifactStore>,
        retention_minutes: u64,
        sweep_interval_secs: u64,
    ) -> Self {
        Self {
            artifact_store,
            retention: chrono::Duration::minutes(retention_minutes as i64),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        }
    }

    pub async fn run(self) {
        tracing::info!(
            retention_minutes = self.retention.num_minutes(),
            sweep_interval_secs = self.sweep_interval.as_secs(),
            "Retention worker started"
        );
        let mut ticker = tokio::time::interval(self.sweep_interval);
        loop {
            ticker.tick().await;
            let cutoff = Utc::now() - self.retention;
            match self.artifact_store.purge_expired(cutoff).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Expired audio artifacts removed"),
                Err(e) => tracing::warn!(error = %e, "Artifact retention sweep failed"),
            }
        }
    }
}
