use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisError, AudioAnalyzer};

const ANALYSIS_PROMPT: &str = "Please analyze this audio and provide:\n\
1. Detailed transcription with:\n\
- Timestamps in [HH:MM:SS] format\n\
- Speaker identification (Speaker A, B, etc.)\n\
2. Sentiment analysis for:\n\
- Overall conversation tone\n\
- Each speaker's emotional state\n\
- Key emotional moments\n\
Format the response as:\n\
Transcription:\n\
[timestamp] Speaker: text\n\
Sentiment Analysis:\n\
Overall Tone:\n\
Speaker Analysis:\n\
Key Emotional Moments:";

const AUDIO_MIME_TYPE: &str = "audio/mpeg";
const TEMPERATURE: f32 = 0.2;
const TOP_P: f32 = 0.95;
const TOP_K: i32 = 40;

pub struct GeminiAudioAnalyzer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    #[serde(rename_all = "camelCase")]
    InlineData { mime_type: String, data: String },
    Text(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    audio_timestamp: bool,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiAudioAnalyzer {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl AudioAnalyzer for GeminiAudioAnalyzer {
    #[tracing::instrument(
        skip(self, audio_data),
        fields(model = %self.model, audio_bytes = audio_data.len())
    )]
    async fn analyze(&self, audio_data: &[u8]) -> Result<String, AnalysisError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        mime_type: AUDIO_MIME_TYPE.to_string(),
                        data: general_purpose::STANDARD.encode(audio_data),
                    },
                    Part::Text(ANALYSIS_PROMPT.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                audio_timestamp: true,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!("Sending audio for multimodal analysis");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalysisError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        let text: String = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        tracing::info!(chars = text.len(), "Audio analysis completed");

        Ok(text)
    }
}
