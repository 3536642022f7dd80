use engine_config::error::ConfigError;
use engine_processing::transform::error::TransformError;
use thiserror::Error;

/// Errors that stop a run before it starts. Failures during a run are
/// reported through [`crate::execution::outcome::RunOutcome`] instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The schema could not be turned into a normalizer.
    #[error("Normalizer setup error: {0}")]
    Normalizer(#[from] TransformError),
}
