use connectors::{acquire::error::AcquireError, sink::error::SinkError};
use engine_processing::transform::error::TransformError;
use model::core::utils::format_float;
use std::fmt;

/// Counters for one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub input_rows: usize,
    pub retained_rows: usize,
    /// Sum of retained stock; `None` when the table lacked the inventory
    /// columns and was passed through.
    pub total: Option<f64>,
    pub banner: String,
    pub elapsed_ms: u128,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows published",
            self.retained_rows, self.input_rows
        )?;
        if let Some(total) = self.total {
            write!(f, ", total stock {}", format_float(total))?;
        }
        write!(f, " in {} ms ({})", self.elapsed_ms, self.banner)
    }
}

/// How a run ended. Every phase failure is terminal for the run.
#[derive(Debug)]
pub enum RunOutcome {
    Published(RunSummary),
    AcquisitionFailed(AcquireError),
    TransformFailed(TransformError),
    PublishFailed(SinkError),
    /// Shutdown was requested before the grid was published.
    Cancelled,
}

impl RunOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, RunOutcome::Published(_))
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Published(summary) => Some(summary),
            _ => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Published(summary) => write!(f, "Published: {summary}"),
            RunOutcome::AcquisitionFailed(e) => write!(f, "Acquisition failed: {e}"),
            RunOutcome::TransformFailed(e) => write!(f, "Transform failed: {e}"),
            RunOutcome::PublishFailed(e) => write!(f, "Publish failed: {e}"),
            RunOutcome::Cancelled => write!(f, "Cancelled"),
        }
    }
}
