use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

const LANGUAGE_CODE: &str = "en-US";
const VOICE_NAME: &str = "en-US-Neural2-F";
const SSML_GENDER: &str = "FEMALE";
const AUDIO_ENCODING: &str = "MP3";
const SPEAKING_RATE: f32 = 0.9;
const PITCH: f32 = 0.0;
const EFFECTS_PROFILE: &str = "telephony-class-application";

pub struct GoogleTtsSynthesizer {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
    ssml_gender: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
    speaking_rate: f32,
    pitch: f32,
    effects_profile_id: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

impl GoogleTtsSynthesizer {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsSynthesizer {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let request_body = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: LANGUAGE_CODE.to_string(),
                name: VOICE_NAME.to_string(),
                ssml_gender: SSML_GENDER.to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING.to_string(),
                speaking_rate: SPEAKING_RATE,
                pitch: PITCH,
                effects_profile_id: vec![EFFECTS_PROFILE.to_string()],
            },
        };

        let url = format!("{}/v1/text:synthesize", self.base_url);

        tracing::debug!("Sending narration text for synthesis");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SynthesisError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        let audio = general_purpose::STANDARD
            .decode(result.audio_content)
            .map_err(|e| SynthesisError::InvalidResponse(format!("audio content: {}", e)))?;

        tracing::info!(audio_bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
