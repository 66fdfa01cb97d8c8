mod artifact_store;
mod audio_analyzer;
mod audio_normalizer;
mod speech_synthesizer;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use audio_analyzer::{AnalysisError, AudioAnalyzer};
pub use audio_normalizer::{AudioNormalizer, MediaProcessingError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
