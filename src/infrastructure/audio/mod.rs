mod symphonia_normalizer;

pub use symphonia_normalizer::SymphoniaNormalizer;
