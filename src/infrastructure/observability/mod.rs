mod init_tracing;
mod preview_text;
mod request_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use preview_text::preview_text;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::TracingConfig;
