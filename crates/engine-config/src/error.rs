use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key the chosen command cannot run without.
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read schema file {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema file {path}: {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
