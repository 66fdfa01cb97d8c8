mod analyze;
mod audio;
mod health;
mod index;
mod upload;

pub use analyze::analyze_handler;
pub use audio::{audio_artifact_handler, get_audio_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use upload::upload_handler;
