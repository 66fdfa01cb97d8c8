use std::io::Cursor;

use async_trait::async_trait;
use mp3lame_encoder::{Birtate, Builder, FlushNoGap, MonoPcm, Quality};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioNormalizer, MediaProcessingError};
use crate::domain::AudioFormat;

const TARGET_SAMPLE_RATE: u32 = 44_100;

/// Decodes whatever container the upload arrived in and re-encodes it as
/// mono 44.1kHz MP3 at the highest LAME quality setting. Uploads already
/// declared as MP3 pass through untouched.
pub struct SymphoniaNormalizer;

impl SymphoniaNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SymphoniaNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioNormalizer for SymphoniaNormalizer {
    #[tracing::instrument(
        skip(self, data),
        fields(input_bytes = data.len(), format = ?format_hint)
    )]
    async fn normalize(
        &self,
        data: &[u8],
        format_hint: Option<AudioFormat>,
    ) -> Result<Vec<u8>, MediaProcessingError> {
        if format_hint == Some(AudioFormat::Mp3) {
            return Ok(data.to_vec());
        }

        let data_owned = data.to_vec();
        let mp3 = tokio::task::spawn_blocking(move || {
            let pcm = decode_to_mono_pcm(&data_owned, format_hint)?;
            encode_mp3(&pcm)
        })
        .await
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("task join error: {e}")))??;

        tracing::debug!(
            output_bytes = mp3.len(),
            "Audio normalized to mono 44.1kHz MP3"
        );

        Ok(mp3)
    }
}

fn decode_to_mono_pcm(
    data: &[u8],
    format_hint: Option<AudioFormat>,
) -> Result<Vec<f32>, MediaProcessingError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(format) = format_hint {
        hint.with_extension(format.as_extension());
    }
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();
    let decoder_opts = DecoderOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| match e {
            symphonia::core::errors::Error::Unsupported(what) => {
                MediaProcessingError::UnsupportedFormat(what.to_string())
            }
            e => MediaProcessingError::DecodingFailed(format!("probe: {}", e)),
        })?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| MediaProcessingError::DecodingFailed("no audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| MediaProcessingError::DecodingFailed("unknown sample rate".to_string()))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &decoder_opts)
        .map_err(|e| match e {
            symphonia::core::errors::Error::Unsupported(what) => {
                MediaProcessingError::UnsupportedFormat(what.to_string())
            }
            e => MediaProcessingError::DecodingFailed(format!("codec: {}", e)),
        })?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(MediaProcessingError::DecodingFailed(format!("packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => {
                return Err(MediaProcessingError::DecodingFailed(format!("decode: {}", e)));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let samples = sample_buf.samples();

        // Downmix to mono if multi-channel
        if channels > 1 {
            for frame in samples.chunks(channels) {
                let mono: f32 = frame.iter().sum::<f32>() / channels as f32;
                all_samples.push(mono);
            }
        } else {
            all_samples.extend_from_slice(samples);
        }
    }

    if all_samples.is_empty() {
        return Err(MediaProcessingError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    if source_rate != TARGET_SAMPLE_RATE {
        all_samples = resample(&all_samples, source_rate, TARGET_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = all_samples.len(),
        duration_secs = all_samples.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Audio decoded to 44.1kHz mono PCM"
    );

    Ok(all_samples)
}

fn resample(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<f32>, MediaProcessingError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| MediaProcessingError::DecodingFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let input = if chunk.len() < chunk_size {
            let mut padded = chunk.to_vec();
            padded.resize(chunk_size, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let result = resampler
            .process(&[input], None)
            .map_err(|e| MediaProcessingError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    // Trim to approximate expected length
    let expected_len = (samples.len() as f64 * ratio) as usize;
    output.truncate(expected_len);

    Ok(output)
}

fn encode_mp3(samples: &[f32]) -> Result<Vec<u8>, MediaProcessingError> {
    let mut builder = Builder::new().ok_or_else(|| {
        MediaProcessingError::EncodingFailed("lame builder init failed".to_string())
    })?;
    builder
        .set_num_channels(1)
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("channels: {}", e)))?;
    builder
        .set_sample_rate(TARGET_SAMPLE_RATE)
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("sample rate: {}", e)))?;
    builder
        .set_brate(Birtate::Kbps320)
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("bitrate: {}", e)))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("quality: {}", e)))?;
    let mut encoder = builder
        .build()
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("encoder init: {}", e)))?;

    let pcm: Vec<i16> = samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();

    let mut mp3 = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()));
    let written = encoder
        .encode(MonoPcm(&pcm), mp3.spare_capacity_mut())
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("encode: {}", e)))?;
    // Safety: encode wrote exactly `written` bytes into the spare capacity
    unsafe { mp3.set_len(mp3.len() + written) };

    let written = encoder
        .flush::<FlushNoGap>(mp3.spare_capacity_mut())
        .map_err(|e| MediaProcessingError::EncodingFailed(format!("flush: {}", e)))?;
    // Safety: flush wrote exactly `written` bytes into the spare capacity
    unsafe { mp3.set_len(mp3.len() + written) };

    Ok(mp3)
}
