use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{AudioAnalyzer, AudioNormalizer, SpeechSynthesizer};
use crate::application::services::{AnalysisOutcome, PipelineError};
use crate::domain::AudioFormat;
use crate::infrastructure::observability::preview_text;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub transcription: String,
    pub sentiment: String,
    pub audio_url: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub(super) struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

/// Accepts a recording in the `audio` multipart field. The bytes are taken
/// to already be MP3, so normalization passes them through unchanged.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<N, A, S>(
    State(state): State<AppState<N, A, S>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static,
    A: AudioAnalyzer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let upload = match read_file_field(multipart, "audio").await {
        Ok(u) => u,
        Err(response) => return response,
    };

    tracing::debug!(bytes = upload.data.len(), "Audio upload received");

    match state
        .analysis_service
        .process(&upload.data, Some(AudioFormat::Mp3))
        .await
    {
        Ok(outcome) => analysis_success_response(&outcome),
        Err(e) => pipeline_error_response(&e),
    }
}

pub(super) async fn read_file_field(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<UploadedFile, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!(field_name, "Upload request without the expected file field");
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDetail {
                        detail: format!("Missing file field: {}", field_name),
                    }),
                )
                    .into_response());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDetail {
                        detail: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response());
            }
        };

        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field.file_name().map(String::from);

        return match field.bytes().await {
            Ok(bytes) => Ok(UploadedFile {
                data: bytes.to_vec(),
                filename,
            }),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDetail {
                        detail: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response())
            }
        };
    }
}

pub(super) fn analysis_success_response(outcome: &AnalysisOutcome) -> Response {
    tracing::info!(
        artifact_id = %outcome.artifact_id.as_uuid(),
        analysis = %preview_text(outcome.analysis.raw()),
        "Audio analysis pipeline completed"
    );

    (
        StatusCode::OK,
        Json(AnalysisResponse {
            success: true,
            transcription: outcome.analysis.transcription().to_string(),
            sentiment: outcome.analysis.sentiment().to_string(),
            audio_url: format!("/audio/{}", outcome.artifact_id.as_uuid()),
        }),
    )
        .into_response()
}

pub(super) fn pipeline_error_response(error: &PipelineError) -> Response {
    let detail = match error {
        PipelineError::MediaProcessing(e) => {
            tracing::error!(error = %e, "Audio normalization failed");
            "Failed to process audio"
        }
        PipelineError::Analysis(e) => {
            tracing::error!(error = %e, "Audio analysis failed");
            "Analysis failed"
        }
        PipelineError::Synthesis(e) => {
            tracing::error!(error = %e, "Speech synthesis failed");
            "Text-to-speech failed"
        }
        PipelineError::Storage(e) => {
            tracing::error!(error = %e, "Failed to persist synthesized audio");
            "Text-to-speech failed"
        }
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDetail {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
