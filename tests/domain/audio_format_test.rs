use sibolga::domain::AudioFormat;

#[test]
fn given_known_extensions_when_parsing_then_returns_format() {
    assert_eq!(AudioFormat::from_extension("mp3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_extension("wav"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_extension("flac"), Some(AudioFormat::Flac));
    assert_eq!(AudioFormat::from_extension("ogg"), Some(AudioFormat::Ogg));
    assert_eq!(AudioFormat::from_extension("m4a"), Some(AudioFormat::M4a));
    assert_eq!(AudioFormat::from_extension("aac"), Some(AudioFormat::Aac));
}

#[test]
fn given_uppercase_extension_when_parsing_then_matches_case_insensitively() {
    assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_extension("Wav"), Some(AudioFormat::Wav));
}

#[test]
fn given_unknown_extension_when_parsing_then_returns_none() {
    assert_eq!(AudioFormat::from_extension("txt"), None);
    assert_eq!(AudioFormat::from_extension(""), None);
}

#[test]
fn given_filename_when_parsing_then_uses_last_extension() {
    assert_eq!(
        AudioFormat::from_filename("recording.mp3"),
        Some(AudioFormat::Mp3)
    );
    assert_eq!(
        AudioFormat::from_filename("backup.2024.wav"),
        Some(AudioFormat::Wav)
    );
}

#[test]
fn given_filename_without_extension_when_parsing_then_returns_none() {
    assert_eq!(AudioFormat::from_filename("recording"), None);
}

#[test]
fn given_format_when_rendering_extension_then_round_trips() {
    for format in [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::Ogg,
        AudioFormat::M4a,
        AudioFormat::Aac,
    ] {
        assert_eq!(AudioFormat::from_extension(format.as_extension()), Some(format));
    }
}
