use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::{
    ArtifactStoreError, AudioAnalyzer, AudioNormalizer, SpeechSynthesizer,
};
use crate::domain::ArtifactId;
use crate::presentation::handlers::upload::ErrorDetail;
use crate::presentation::state::AppState;

/// Serves the most recently synthesized response. 404 until the first
/// pipeline run after startup completes.
pub async fn get_audio_handler<N, A, S>(State(state): State<AppState<N, A, S>>) -> impl IntoResponse
where
    N: AudioNormalizer + 'static,
    A: AudioAnalyzer + 'static,
    S: SpeechSynthesizer + 'static,
{
    match state.artifact_store.latest().await {
        Ok(bytes) => mp3_response(bytes),
        Err(ArtifactStoreError::NotFound(_)) => no_audio_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read latest audio");
            read_failure_response()
        }
    }
}

/// Serves one synthesized response by the id returned in `audio_url`.
pub async fn audio_artifact_handler<N, A, S>(
    State(state): State<AppState<N, A, S>>,
    Path(artifact_id): Path<String>,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static,
    A: AudioAnalyzer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let uuid = match Uuid::parse_str(&artifact_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorDetail {
                    detail: format!("Invalid artifact ID: {}", artifact_id),
                }),
            )
                .into_response();
        }
    };

    match state
        .artifact_store
        .fetch(ArtifactId::from_uuid(uuid))
        .await
    {
        Ok(bytes) => mp3_response(bytes),
        Err(ArtifactStoreError::NotFound(_)) => no_audio_response(),
        Err(e) => {
            tracing::error!(error = %e, artifact_id = %uuid, "Failed to read audio artifact");
            read_failure_response()
        }
    }
}

fn mp3_response(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::ACCEPT_RANGES, "bytes"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"response.mp3\"",
            ),
        ],
        bytes,
    )
        .into_response()
}

fn no_audio_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDetail {
            detail: "No audio response available".to_string(),
        }),
    )
        .into_response()
}

fn read_failure_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDetail {
            detail: "Failed to read audio".to_string(),
        }),
    )
        .into_response()
}
