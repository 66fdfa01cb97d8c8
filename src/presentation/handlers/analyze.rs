use axum::extract::{Multipart, State};
use axum::response::IntoResponse;

use crate::application::ports::{AudioAnalyzer, AudioNormalizer, SpeechSynthesizer};
use crate::domain::AudioFormat;
use crate::presentation::handlers::upload::{
    analysis_success_response, pipeline_error_response, read_file_field,
};
use crate::presentation::state::AppState;

/// Accepts a recording in the `file` multipart field. The container format
/// is inferred from the filename extension; without one the decoder probes
/// the bytes.
#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<N, A, S>(
    State(state): State<AppState<N, A, S>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static,
    A: AudioAnalyzer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let upload = match read_file_field(multipart, "file").await {
        Ok(u) => u,
        Err(response) => return response,
    };

    let format_hint = upload
        .filename
        .as_deref()
        .and_then(AudioFormat::from_filename);

    tracing::debug!(
        bytes = upload.data.len(),
        filename = upload.filename.as_deref().unwrap_or("unknown"),
        format = ?format_hint,
        "Audio file received for analysis"
    );

    match state
        .analysis_service
        .process(&upload.data, format_hint)
        .await
    {
        Ok(outcome) => analysis_success_response(&outcome),
        Err(e) => pipeline_error_response(&e),
    }
}
