use async_trait::async_trait;

use crate::domain::AudioFormat;

#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    /// Re-encode arbitrary input audio as mono 44.1kHz MP3. The hint names the
    /// container the caller believes the bytes are in; decoding may still
    /// succeed without one.
    async fn normalize(
        &self,
        data: &[u8],
        format_hint: Option<AudioFormat>,
    ) -> Result<Vec<u8>, MediaProcessingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaProcessingError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
}
