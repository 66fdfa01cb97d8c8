use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use base64::{Engine as _, engine::general_purpose};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use sibolga::application::ports::{SpeechSynthesizer, SynthesisError};
use sibolga::infrastructure::speech::GoogleTtsSynthesizer;

async fn start_mock_tts_server(
    response_status: u16,
    response_body: String,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/text:synthesize",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[tokio::test]
async fn given_audio_content_when_synthesizing_then_returns_decoded_bytes() {
    let speech = b"synthesized speech bytes";
    let body = format!(
        r#"{{"audioContent": "{}"}}"#,
        general_purpose::STANDARD.encode(speech)
    );
    let (base_url, shutdown_tx) = start_mock_tts_server(200, body).await;

    let synthesizer = GoogleTtsSynthesizer::new(&base_url, "test-key");
    let result = synthesizer.synthesize("Transcription: hello").await;

    assert_eq!(result.unwrap(), speech);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_synthesizing_then_returns_rate_limited() {
    let (base_url, shutdown_tx) =
        start_mock_tts_server(429, r#"{"error": {"message": "quota"}}"#.to_string()).await;

    let synthesizer = GoogleTtsSynthesizer::new(&base_url, "test-key");
    let result = synthesizer.synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_synthesizing_then_returns_api_error_with_status() {
    let (base_url, shutdown_tx) =
        start_mock_tts_server(400, r#"{"error": {"message": "bad voice"}}"#.to_string()).await;

    let synthesizer = GoogleTtsSynthesizer::new(&base_url, "test-key");
    let result = synthesizer.synthesize("hello").await;

    match result {
        Err(SynthesisError::ApiRequestFailed(message)) => {
            assert!(message.contains("HTTP 400"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_invalid_base64_when_synthesizing_then_returns_invalid_response() {
    let (base_url, shutdown_tx) =
        start_mock_tts_server(200, r#"{"audioContent": "!!!not base64!!!"}"#.to_string()).await;

    let synthesizer = GoogleTtsSynthesizer::new(&base_url, "test-key");
    let result = synthesizer.synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_audio_content_when_synthesizing_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_tts_server(200, "{}".to_string()).await;

    let synthesizer = GoogleTtsSynthesizer::new(&base_url, "test-key");
    let result = synthesizer.synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
