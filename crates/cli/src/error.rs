use connectors::sink::error::SinkError;
use engine_config::error::ConfigError;
use engine_processing::transform::error::TransformError;
use engine_runtime::error::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid sync configuration: {0}")]
    SyncConfig(#[from] ConfigError),

    #[error("Failed to set up the sync: {0}")]
    Sync(#[from] SyncError),

    #[error("Failed to normalize the export: {0}")]
    Transform(#[from] TransformError),

    #[error("Failed to write the output: {0}")]
    Sink(#[from] SinkError),
}
