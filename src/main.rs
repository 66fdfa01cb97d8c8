use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use sibolga::application::ports::ArtifactStore;
use sibolga::application::services::{AnalysisService, RetentionWorker};
use sibolga::infrastructure::analysis::GeminiAudioAnalyzer;
use sibolga::infrastructure::audio::SymphoniaNormalizer;
use sibolga::infrastructure::observability::{TracingConfig, init_tracing};
use sibolga::infrastructure::speech::GoogleTtsSynthesizer;
use sibolga::infrastructure::storage::LocalArtifactStore;
use sibolga::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
            filter: settings.logging.level.clone(),
        },
        settings.server.port,
    );

    let artifact_store = Arc::new(LocalArtifactStore::new(
        settings.storage.artifact_dir.clone(),
    )?);

    // Drop anything left over from a previous run
    artifact_store.clear().await?;

    let normalizer = Arc::new(SymphoniaNormalizer::new());
    let analyzer = Arc::new(GeminiAudioAnalyzer::new(
        &settings.analysis.base_url,
        &settings.analysis.api_key,
        &settings.analysis.model,
    ));
    let synthesizer = Arc::new(GoogleTtsSynthesizer::new(
        &settings.speech.base_url,
        &settings.speech.api_key,
    ));

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::clone(&normalizer),
        Arc::clone(&analyzer),
        Arc::clone(&synthesizer),
        Arc::clone(&artifact_store) as Arc<dyn ArtifactStore>,
    ));

    let retention_worker = RetentionWorker::new(
        Arc::clone(&artifact_store) as Arc<dyn ArtifactStore>,
        settings.storage.retention_minutes,
        settings.storage.sweep_interval_secs,
    );
    tokio::spawn(retention_worker.run());

    let host: IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));

    let state = AppState {
        analysis_service,
        artifact_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
