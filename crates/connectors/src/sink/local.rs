use crate::sink::{GridSink, error::SinkError};
use async_trait::async_trait;
use model::records::grid::Grid;
use std::{io::Write, path::PathBuf};
use tracing::info;

/// Writes the banner row and the grid to a UTF-8 CSV file, replacing it.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSink { path: path.into() }
    }
}

#[async_trait]
impl GridSink for CsvFileSink {
    async fn publish(&self, banner: &str, grid: &Grid) -> Result<(), SinkError> {
        let file = std::fs::File::create(&self.path)?;
        write_csv(file, banner, grid)?;
        info!("Wrote {} rows to {}", grid.height(), self.path.display());
        Ok(())
    }
}

/// Prints the banner row and the grid to stdout as CSV.
pub struct StdoutSink;

#[async_trait]
impl GridSink for StdoutSink {
    async fn publish(&self, banner: &str, grid: &Grid) -> Result<(), SinkError> {
        let stdout = std::io::stdout();
        write_csv(stdout.lock(), banner, grid)
    }
}

pub fn write_csv<W: Write>(out: W, banner: &str, grid: &Grid) -> Result<(), SinkError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record([banner])?;
    for row in grid.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
