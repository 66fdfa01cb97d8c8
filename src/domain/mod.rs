mod analysis;
mod artifact;
mod audio_format;

pub use analysis::{AudioAnalysis, SENTIMENT_MARKER, TRANSCRIPTION_MARKER};
pub use artifact::ArtifactId;
pub use audio_format::AudioFormat;
