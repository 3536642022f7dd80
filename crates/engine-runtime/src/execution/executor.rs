use crate::{
    error::SyncError,
    execution::{
        factory,
        outcome::{RunOutcome, RunSummary},
    },
};
use chrono_tz::Tz;
use connectors::{acquire::Acquirer, sink::GridSink};
use engine_config::sync::SyncConfig;
use engine_processing::normalizer::Normalizer;
use model::core::timestamp::Timestamp;
use std::{sync::Arc, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Builds the run from `config` and executes it once.
pub async fn run(
    config: &SyncConfig,
    dry_run: bool,
    cancel: CancellationToken,
) -> Result<RunOutcome, SyncError> {
    let executor = SyncExecutor::new(
        factory::create_acquirer(config),
        Normalizer::new(&config.schema)?,
        factory::create_sink(config, dry_run)?,
        config.timezone,
    )
    .with_cancel(cancel);

    Ok(executor.execute().await)
}

/// Acquire, normalize, publish. The export file is deleted once it has been
/// read, whether or not normalizing it succeeded.
pub struct SyncExecutor {
    acquirer: Arc<dyn Acquirer>,
    normalizer: Normalizer,
    sink: Arc<dyn GridSink>,
    timezone: Tz,
    cancel: CancellationToken,
}

impl SyncExecutor {
    pub fn new(
        acquirer: Arc<dyn Acquirer>,
        normalizer: Normalizer,
        sink: Arc<dyn GridSink>,
        timezone: Tz,
    ) -> Self {
        Self {
            acquirer,
            normalizer,
            sink,
            timezone,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn execute(&self) -> RunOutcome {
        let start = Instant::now();
        info!("Starting inventory sync");

        let export = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Shutdown requested while acquiring the export");
                return RunOutcome::Cancelled;
            }
            acquired = self.acquirer.acquire() => match acquired {
                Ok(export) => export,
                Err(err) => {
                    error!("Acquisition failed: {}", err);
                    return RunOutcome::AcquisitionFailed(err);
                }
            },
        };

        let path = export.path().to_path_buf();
        let loaded = self.normalizer.load(&path);
        if let Err(err) = export.discard() {
            warn!("Failed to remove export {}: {}", path.display(), err);
        }

        let raw = match loaded {
            Ok(raw) => raw,
            Err(err) => {
                error!("Failed to read export {}: {}", path.display(), err);
                return RunOutcome::TransformFailed(err);
            }
        };
        let input_rows = raw.len();
        let normalized = self.normalizer.normalize(raw);

        if self.cancel.is_cancelled() {
            warn!("Shutdown requested before publishing, spreadsheet left untouched");
            return RunOutcome::Cancelled;
        }

        let banner = Timestamp::now(self.timezone).banner();
        let grid = normalized.to_grid();
        if let Err(err) = self.sink.publish(&banner, &grid).await {
            error!("Publish failed: {}", err);
            return RunOutcome::PublishFailed(err);
        }

        let summary = RunSummary {
            input_rows,
            retained_rows: normalized.table.len(),
            total: normalized.aggregate.as_ref().map(|a| a.total),
            banner,
            elapsed_ms: start.elapsed().as_millis(),
        };
        info!("Sync completed: {}", summary);
        RunOutcome::Published(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use connectors::{
        acquire::{AcquiredExport, error::AcquireError},
        sink::error::SinkError,
    };
    use model::{
        core::timestamp::BANNER_PREFIX, records::grid::Grid,
        transform::schema::SchemaConfig,
    };
    use pretty_assertions::assert_eq;
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
        time::Duration,
    };
    use tracing_test::traced_test;

    struct FileAcquirer {
        path: PathBuf,
    }

    #[async_trait]
    impl Acquirer for FileAcquirer {
        async fn acquire(&self) -> Result<AcquiredExport, AcquireError> {
            Ok(AcquiredExport::new(&self.path))
        }
    }

    struct FailingAcquirer;

    #[async_trait]
    impl Acquirer for FailingAcquirer {
        async fn acquire(&self) -> Result<AcquiredExport, AcquireError> {
            Err(AcquireError::ExportFailed {
                attempts: 3,
                reason: "portal unreachable".to_string(),
            })
        }
    }

    struct PendingAcquirer;

    #[async_trait]
    impl Acquirer for PendingAcquirer {
        async fn acquire(&self) -> Result<AcquiredExport, AcquireError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(AcquireError::ExportTimedOut(Duration::from_secs(3600)))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<(String, Grid)>>,
    }

    #[async_trait]
    impl GridSink for RecordingSink {
        async fn publish(&self, banner: &str, grid: &Grid) -> Result<(), SinkError> {
            self.published
                .lock()
                .unwrap()
                .push((banner.to_string(), grid.clone()));
            Ok(())
        }
    }

    struct RejectingSink;

    #[async_trait]
    impl GridSink for RejectingSink {
        async fn publish(&self, _banner: &str, _grid: &Grid) -> Result<(), SinkError> {
            Err(SinkError::Rejected {
                operation: "clear",
                status: 500,
                body: "backend error".to_string(),
            })
        }
    }

    fn write_export(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("zaiko_20240501.csv");
        let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
        assert!(!had_errors);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn executor(acquirer: Arc<dyn Acquirer>, sink: Arc<dyn GridSink>) -> SyncExecutor {
        SyncExecutor::new(
            acquirer,
            Normalizer::new(&SchemaConfig::default()).unwrap(),
            sink,
            chrono_tz::Asia::Tokyo,
        )
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    #[traced_test]
    async fn test_publishes_normalized_grid_and_removes_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(
            dir.path(),
            "品番,商品名,実在庫数\nA1,Widget,5\nB2 Sticker,Bad,3\nC3,Zero,0\n",
        );
        let sink = Arc::new(RecordingSink::default());

        let outcome = executor(Arc::new(FileAcquirer { path: path.clone() }), sink.clone())
            .execute()
            .await;

        let summary = outcome.summary().unwrap();
        assert_eq!(summary.input_rows, 3);
        assert_eq!(summary.retained_rows, 1);
        assert_eq!(summary.total, Some(5.0));
        assert!(!path.exists());

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (banner, grid) = &published[0];
        assert!(banner.starts_with(BANNER_PREFIX));
        assert_eq!(
            grid.rows(),
            &[
                row(&["Product No.", "Product Name", "Stock"]),
                row(&["A1", "Widget", "5"]),
                row(&["Total", "", "5.0"]),
            ]
        );
        assert!(logs_contain("Sync completed"));
    }

    #[tokio::test]
    async fn test_acquisition_failure_skips_publish() {
        let sink = Arc::new(RecordingSink::default());

        let outcome = executor(Arc::new(FailingAcquirer), sink.clone())
            .execute()
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::AcquisitionFailed(AcquireError::ExportFailed { attempts: 3, .. })
        ));
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_export_is_still_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zaiko.csv");
        std::fs::write(&path, [b'a', 0x81, 0x20]).unwrap();
        let sink = Arc::new(RecordingSink::default());

        let outcome = executor(Arc::new(FileAcquirer { path: path.clone() }), sink.clone())
            .execute()
            .await;

        assert!(matches!(outcome, RunOutcome::TransformFailed(_)));
        assert!(!path.exists());
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), "品番,商品名,実在庫数\nA1,Widget,5\n");

        let outcome = executor(Arc::new(FileAcquirer { path }), Arc::new(RejectingSink))
            .execute()
            .await;

        match outcome {
            RunOutcome::PublishFailed(SinkError::Rejected { status, .. }) => {
                assert_eq!(status, 500)
            }
            other => panic!("expected PublishFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_interrupts_acquisition() {
        let cancel = CancellationToken::new();
        let sink = Arc::new(RecordingSink::default());
        let executor =
            executor(Arc::new(PendingAcquirer), sink.clone()).with_cancel(cancel.clone());

        let handle = tokio::spawn(async move { executor.execute().await });
        cancel.cancel();

        let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, RunOutcome::Cancelled));
        assert!(sink.published.lock().unwrap().is_empty());
    }
}
