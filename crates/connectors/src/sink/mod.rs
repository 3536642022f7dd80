pub mod error;
pub mod local;
pub mod sheets;

use crate::sink::error::SinkError;
use async_trait::async_trait;
use model::records::grid::Grid;

/// Destination of a run: a freshness banner plus the normalized grid.
///
/// Publishing is a destructive overwrite of whatever the sink held before.
#[async_trait]
pub trait GridSink: Send + Sync {
    async fn publish(&self, banner: &str, grid: &Grid) -> Result<(), SinkError>;
}
