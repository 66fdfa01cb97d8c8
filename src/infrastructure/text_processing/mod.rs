mod speech_text;

pub use speech_text::narration_text;
