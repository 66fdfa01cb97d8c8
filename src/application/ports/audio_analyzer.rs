use async_trait::async_trait;

#[async_trait]
pub trait AudioAnalyzer: Send + Sync {
    /// Transcribe and sentiment-annotate the given audio, returning the raw
    /// model text.
    async fn analyze(&self, audio_data: &[u8]) -> Result<String, AnalysisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned no analysis text")]
    EmptyResponse,
}
