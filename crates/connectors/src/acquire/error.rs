use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The export session could not be set up, even after retrying.
    #[error("Export failed after {attempts} attempt(s): {reason}")]
    ExportFailed { attempts: u32, reason: String },

    /// The export session ran past its deadline and was killed.
    #[error("Export session did not finish within {0:?}")]
    ExportTimedOut(Duration),

    /// No export file matching the pattern appeared in time.
    #[error("No {pattern} file found in {dir} after {waited:?}")]
    FileTimeout {
        dir: String,
        pattern: String,
        waited: Duration,
    },
}
