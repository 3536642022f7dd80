use crate::acquire::{
    AcquiredExport, Acquirer, error::AcquireError, settings::AcquireSettings,
    trigger::ExportTrigger,
};
use async_trait::async_trait;
use std::{path::PathBuf, sync::Arc, time::Instant};
use tokio::fs;
use tracing::{debug, info};

/// Acquires the export by triggering it and then watching the download
/// directory for a file whose name matches the configured prefix.
pub struct DownloadDirAcquirer {
    settings: AcquireSettings,
    trigger: Arc<dyn ExportTrigger>,
}

impl DownloadDirAcquirer {
    pub fn new(settings: AcquireSettings, trigger: Arc<dyn ExportTrigger>) -> Self {
        DownloadDirAcquirer { settings, trigger }
    }

    /// Matching files currently in the download directory, sorted by name.
    pub async fn find_exports(&self) -> Result<Vec<PathBuf>, AcquireError> {
        let mut found = Vec::new();
        let mut entries = fs::read_dir(&self.settings.download_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && self.settings.matches(name)
            {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Removes leftovers of earlier runs so the wait below only sees the new
    /// export.
    pub async fn remove_stale_exports(&self) -> Result<usize, AcquireError> {
        let stale = self.find_exports().await?;
        for path in &stale {
            fs::remove_file(path).await?;
            debug!("Removed stale export {}", path.display());
        }
        Ok(stale.len())
    }

    pub async fn wait_for_export(&self) -> Result<PathBuf, AcquireError> {
        let start = Instant::now();
        loop {
            if let Some(path) = self.find_exports().await?.into_iter().next() {
                return Ok(path);
            }
            let waited = start.elapsed();
            if waited >= self.settings.file_timeout {
                return Err(AcquireError::FileTimeout {
                    dir: self.settings.download_dir.display().to_string(),
                    pattern: self.settings.pattern(),
                    waited,
                });
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

#[async_trait]
impl Acquirer for DownloadDirAcquirer {
    async fn acquire(&self) -> Result<AcquiredExport, AcquireError> {
        fs::create_dir_all(&self.settings.download_dir).await?;

        let removed = self.remove_stale_exports().await?;
        if removed > 0 {
            info!("Removed {} stale export file(s)", removed);
        }

        self.trigger.trigger().await?;

        let path = self.wait_for_export().await?;
        info!("Export file ready: {}", path.display());
        Ok(AcquiredExport::new(path))
    }
}
