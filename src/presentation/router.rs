use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioAnalyzer, AudioNormalizer, SpeechSynthesizer};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_handler, audio_artifact_handler, get_audio_handler, health_handler, index_handler,
    upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<N, A, S>(state: AppState<N, A, S>) -> Router
where
    N: AudioNormalizer + 'static,
    A: AudioAnalyzer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.server.max_upload_mb * 1024 * 1024);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler::<N, A, S>))
        .route("/analyze", post(analyze_handler::<N, A, S>))
        .route("/get_audio", get(get_audio_handler::<N, A, S>))
        .route("/audio/{artifact_id}", get(audio_artifact_handler::<N, A, S>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
