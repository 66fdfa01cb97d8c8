pub const TRANSCRIPTION_MARKER: &str = "Transcription:";
pub const SENTIMENT_MARKER: &str = "Sentiment Analysis:";

/// Raw model output, split at the first sentiment marker. Text after any
/// repeated marker stays inside the sentiment section.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAnalysis {
    raw: String,
}

impl AudioAnalysis {
    pub fn from_raw(raw: String) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Everything before the marker, section label included. The full text
    /// when the model omitted the marker.
    pub fn transcription(&self) -> &str {
        match self.raw.split_once(SENTIMENT_MARKER) {
            Some((before, _)) => before.trim(),
            None => self.raw.trim(),
        }
    }

    /// Everything after the marker, empty when the model omitted it.
    pub fn sentiment(&self) -> &str {
        match self.raw.split_once(SENTIMENT_MARKER) {
            Some((_, after)) => after.trim(),
            None => "",
        }
    }
}
