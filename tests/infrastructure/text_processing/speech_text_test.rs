use sibolga::infrastructure::text_processing::narration_text;

#[test]
fn given_both_sections_when_composing_then_rebuilds_labelled_text() {
    let raw = "Transcription:\n[00:00:01] Speaker A: Hello.\n\nSentiment Analysis:\nOverall Tone: Calm";
    let result = narration_text(raw);

    assert_eq!(
        result,
        "Transcription: [00:00:01] Speaker A: Hello.\n\nSentiment Analysis: Overall Tone: Calm"
    );
}

#[test]
fn given_missing_sentiment_marker_when_composing_then_sentiment_side_is_empty() {
    let result = narration_text("Transcription: plain text only");

    assert_eq!(result, "Transcription: plain text only\n\nSentiment Analysis: ");
}

#[test]
fn given_empty_input_when_composing_then_returns_bare_labels() {
    assert_eq!(narration_text(""), "Transcription: \n\nSentiment Analysis: ");
}

#[test]
fn given_markdown_markers_when_composing_then_strips_them_everywhere() {
    let raw = "Transcription: **Hello** #one\n\nSentiment Analysis:\n## Tone\n**calm**";
    let result = narration_text(raw);

    assert!(!result.contains('*'));
    assert!(!result.contains('#'));
    assert_eq!(
        result,
        "Transcription: Hello one\n\nSentiment Analysis: Tone calm"
    );
}

#[test]
fn given_inline_markup_in_sentiment_when_composing_then_strips_to_plain_words() {
    let raw = "Transcription: Hello\n\nSentiment Analysis: **Good** [tone]";
    let result = narration_text(raw);

    assert_eq!(result, "Transcription: Hello\n\nSentiment Analysis: Good tone");
}

#[test]
fn given_multiline_sentiment_when_composing_then_flattens_to_one_line() {
    let raw = "Transcription: hi\n\nSentiment Analysis:\nOverall Tone: Warm\n\nSpeaker A: Excited\n";
    let result = narration_text(raw);

    assert_eq!(
        result,
        "Transcription: hi\n\nSentiment Analysis: Overall Tone: Warm Speaker A: Excited"
    );
}

#[test]
fn given_brackets_when_composing_then_removes_them_from_sentiment_only() {
    let raw = "Transcription:\n[00:00:05] Speaker A: hi\nSentiment Analysis:\n[00:00:05] calm";
    let result = narration_text(raw);

    assert!(result.contains("[00:00:05] Speaker A: hi"));
    assert!(result.ends_with("Sentiment Analysis: 00:00:05 calm"));
}

#[test]
fn given_repeated_transcription_marker_when_composing_then_removes_every_occurrence() {
    let raw = "Transcription: part one\nTranscription: part two\nSentiment Analysis: fine";
    let result = narration_text(raw);

    assert_eq!(
        result,
        "Transcription: part one\n part two\n\nSentiment Analysis: fine"
    );
}
