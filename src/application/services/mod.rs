mod analysis_service;
mod retention_worker;

pub use analysis_service::{AnalysisOutcome, AnalysisService, PipelineError};
pub use retention_worker::RetentionWorker;
