use std::sync::Arc;

use crate::application::ports::{
    AnalysisError, ArtifactStore, ArtifactStoreError, AudioAnalyzer, AudioNormalizer,
    MediaProcessingError, SpeechSynthesizer, SynthesisError,
};
use crate::domain::{ArtifactId, AudioAnalysis, AudioFormat};
use crate::infrastructure::text_processing::narration_text;

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: AudioAnalysis,
    pub artifact_id: ArtifactId,
}

pub struct AnalysisService<N, A, S>
where
    N: AudioNormalizer,
    A: AudioAnalyzer,
    S: SpeechSynthesizer,
{
    normalizer: Arc<N>,
    analyzer: Arc<A>,
    synthesizer: Arc<S>,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl<N, A, S> AnalysisService<N, A, S>
where
    N: AudioNormalizer,
    A: AudioAnalyzer,
    S: SpeechSynthesizer,
{
    pub fn new(
        normalizer: Arc<N>,
        analyzer: Arc<A>,
        synthesizer: Arc<S>,
        artifact_store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            normalizer,
            analyzer,
            synthesizer,
            artifact_store,
        }
    }

    /// Run the full pipeline on one upload: normalize to mono 44.1kHz MP3,
    /// analyze, synthesize a spoken rendition of the sanitized text, and
    /// persist it under a fresh artifact id.
    pub async fn process(
        &self,
        data: &[u8],
        format_hint: Option<AudioFormat>,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let normalized = self
            .normalizer
            .normalize(data, format_hint)
            .await
            .map_err(PipelineError::MediaProcessing)?;

        let raw = self
            .analyzer
            .analyze(&normalized)
            .await
            .map_err(PipelineError::Analysis)?;
        let analysis = AudioAnalysis::from_raw(raw);

        let narration = narration_text(analysis.raw());
        let speech = self
            .synthesizer
            .synthesize(&narration)
            .await
            .map_err(PipelineError::Synthesis)?;

        let artifact_id = ArtifactId::new();
        self.artifact_store
            .store(artifact_id, speech)
            .await
            .map_err(PipelineError::Storage)?;

        Ok(AnalysisOutcome {
            analysis,
            artifact_id,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("media processing: {0}")]
    MediaProcessing(#[from] MediaProcessingError),
    #[error("analysis: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("speech synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("artifact storage: {0}")]
    Storage(#[from] ArtifactStoreError),
}
