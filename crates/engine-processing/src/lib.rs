pub mod normalizer;
pub mod transform;
