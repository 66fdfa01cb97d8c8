use sibolga::application::ports::{AudioNormalizer, MediaProcessingError};
use sibolga::domain::AudioFormat;
use sibolga::infrastructure::audio::SymphoniaNormalizer;

fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

fn sine_samples(count: usize) -> Vec<i16> {
    (0..count)
        .map(|i| ((i as f32 * 0.05).sin() * 8000.0) as i16)
        .collect()
}

fn probed_rate_and_channels(mp3: Vec<u8>) -> (u32, usize) {
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let mss = MediaSourceStream::new(Box::new(std::io::Cursor::new(mp3)), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .unwrap();
    let track = probed.format.default_track().unwrap();

    let rate = track.codec_params.sample_rate.unwrap();
    let channels = track.codec_params.channels.map(|c| c.count()).unwrap();
    (rate, channels)
}

#[tokio::test]
async fn given_wav_at_target_rate_when_normalizing_then_produces_mp3() {
    let wav = build_wav(44_100, 1, &sine_samples(4410));
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&wav, Some(AudioFormat::Wav)).await;

    assert!(result.is_ok());
    let mp3 = result.unwrap();
    assert!(!mp3.is_empty());
    assert_ne!(mp3, wav);
}

#[tokio::test]
async fn given_wav_at_16khz_when_normalizing_then_output_is_44_1khz() {
    let wav = build_wav(16_000, 1, &sine_samples(1600));
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&wav, Some(AudioFormat::Wav)).await;

    let (rate, channels) = probed_rate_and_channels(result.unwrap());
    assert_eq!(rate, 44_100);
    assert_eq!(channels, 1);
}

#[tokio::test]
async fn given_stereo_wav_when_normalizing_then_downmixes_to_mono() {
    // Interleaved L/R frames
    let mono = sine_samples(2205);
    let mut stereo = Vec::with_capacity(mono.len() * 2);
    for &s in &mono {
        stereo.push(s);
        stereo.push(-s);
    }
    let wav = build_wav(44_100, 2, &stereo);
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&wav, Some(AudioFormat::Wav)).await;

    let (rate, channels) = probed_rate_and_channels(result.unwrap());
    assert_eq!(rate, 44_100);
    assert_eq!(channels, 1);
}

#[tokio::test]
async fn given_wav_without_hint_when_normalizing_then_probe_detects_format() {
    let wav = build_wav(44_100, 1, &sine_samples(4410));
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&wav, None).await;

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[tokio::test]
async fn given_mp3_hint_when_normalizing_then_passes_bytes_through() {
    let data = b"already encoded mp3 payload";
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(data, Some(AudioFormat::Mp3)).await;

    assert_eq!(result.unwrap(), data);
}

#[tokio::test]
async fn given_garbage_bytes_when_normalizing_then_returns_error() {
    let garbage = vec![0xABu8; 64];
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&garbage, None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_empty_bytes_when_normalizing_then_returns_error() {
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&[], None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_truncated_wav_header_when_normalizing_then_returns_error() {
    let wav = build_wav(44_100, 1, &sine_samples(4410));
    let normalizer = SymphoniaNormalizer::new();

    let result = normalizer.normalize(&wav[..20], Some(AudioFormat::Wav)).await;

    assert!(matches!(
        result,
        Err(MediaProcessingError::DecodingFailed(_))
            | Err(MediaProcessingError::UnsupportedFormat(_))
    ));
}
