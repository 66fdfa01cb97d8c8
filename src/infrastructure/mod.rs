pub mod analysis;
pub mod audio;
pub mod observability;
pub mod speech;
pub mod storage;
pub mod text_processing;
