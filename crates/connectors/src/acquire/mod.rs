pub mod download_dir;
pub mod error;
pub mod retry;
pub mod settings;
pub mod trigger;

use crate::acquire::error::AcquireError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the raw export file for one run.
#[async_trait]
pub trait Acquirer: Send + Sync {
    async fn acquire(&self) -> Result<AcquiredExport, AcquireError>;
}

/// An export file that landed on disk and has not been consumed yet.
#[derive(Debug)]
pub struct AcquiredExport {
    path: PathBuf,
}

impl AcquiredExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AcquiredExport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the consumed file.
    pub fn discard(self) -> Result<(), AcquireError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed consumed export {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AcquireError::Io(e)),
        }
    }
}
