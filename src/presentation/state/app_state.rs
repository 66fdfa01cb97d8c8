use std::sync::Arc;

use crate::application::ports::{ArtifactStore, AudioAnalyzer, AudioNormalizer, SpeechSynthesizer};
use crate::application::services::AnalysisService;
use crate::presentation::config::Settings;

pub struct AppState<N, A, S>
where
    N: AudioNormalizer,
    A: AudioAnalyzer,
    S: SpeechSynthesizer,
{
    pub analysis_service: Arc<AnalysisService<N, A, S>>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub settings: Settings,
}

impl<N, A, S> Clone for AppState<N, A, S>
where
    N: AudioNormalizer,
    A: AudioAnalyzer,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            artifact_store: Arc::clone(&self.artifact_store),
            settings: self.settings.clone(),
        }
    }
}
