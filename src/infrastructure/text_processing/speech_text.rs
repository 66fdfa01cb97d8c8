use crate::domain::{SENTIMENT_MARKER, TRANSCRIPTION_MARKER};

/// Rewrite raw analysis text as something a voice can read aloud.
///
/// Only the sentiment section is cleaned of markdown markers and bracketed
/// timestamps and flattened onto one line; the transcription section keeps
/// its wording apart from the global `*`/`#` sweep at the end. The JSON
/// response elsewhere uses the raw text, so the two may differ.
pub fn narration_text(raw: &str) -> String {
    let (transcription_part, sentiment_part) = match raw.split_once(SENTIMENT_MARKER) {
        Some((before, after)) => (before, after),
        None => (raw, ""),
    };

    let transcription = transcription_part.replace(TRANSCRIPTION_MARKER, "");
    let transcription = transcription.trim();
    let sentiment = flatten_sentiment(sentiment_part.trim());

    let composed = format!("Transcription: {transcription}\n\nSentiment Analysis: {sentiment}");
    composed.replace(['*', '#'], "")
}

fn flatten_sentiment(sentiment: &str) -> String {
    let cleaned = sentiment
        .replace("**", "")
        .replace("##", "")
        .replace(['[', ']'], "");

    cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
