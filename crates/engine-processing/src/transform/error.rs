use connectors::file::csv::error::FileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    /// The export could not be read or decoded.
    #[error("Failed to read export: {0}")]
    Source(#[from] FileError),

    /// The units pattern in the schema does not compile.
    #[error("Invalid units pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
