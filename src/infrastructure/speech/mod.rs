mod google_tts;

pub use google_tts::GoogleTtsSynthesizer;
