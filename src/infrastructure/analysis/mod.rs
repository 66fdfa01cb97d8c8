mod gemini_analyzer;

pub use gemini_analyzer::GeminiAudioAnalyzer;
