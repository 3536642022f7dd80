use crate::acquire::{
    error::AcquireError,
    retry::{RetryDisposition, with_bounded_retries},
    settings::SessionSettings,
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::info;

/// Asks the portal to produce an export into the download directory.
#[async_trait]
pub trait ExportTrigger: Send + Sync {
    async fn trigger(&self) -> Result<(), AcquireError>;
}

/// For runs where the export file is dropped into the download directory by
/// something else.
pub struct ManualTrigger;

#[async_trait]
impl ExportTrigger for ManualTrigger {
    async fn trigger(&self) -> Result<(), AcquireError> {
        info!("No export command configured, waiting for the export file");
        Ok(())
    }
}

/// Runs an external command (typically a headless browser script) that logs
/// into the portal and clicks through the export.
///
/// The command runs through `sh -c` with `WMS_DOWNLOAD_DIR` and any extra
/// environment (portal credentials) set. A failed launch or non-zero exit is
/// retried per [`SessionSettings`]; running past the session timeout kills
/// the child and is not retried.
pub struct CommandExportTrigger {
    command: String,
    download_dir: PathBuf,
    envs: Vec<(String, String)>,
    session: SessionSettings,
}

impl CommandExportTrigger {
    pub fn new(
        command: impl Into<String>,
        download_dir: impl Into<PathBuf>,
        envs: Vec<(String, String)>,
        session: SessionSettings,
    ) -> Self {
        CommandExportTrigger {
            command: command.into(),
            download_dir: download_dir.into(),
            envs,
            session,
        }
    }

    async fn run_once(&self) -> Result<(), AcquireError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("WMS_DOWNLOAD_DIR", &self.download_dir)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true)
            .spawn()?;

        let status = match tokio::time::timeout(self.session.timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => return Err(AcquireError::ExportTimedOut(self.session.timeout)),
        };

        if status.success() {
            Ok(())
        } else {
            Err(AcquireError::ExportFailed {
                attempts: 1,
                reason: format!("export command exited with {status}"),
            })
        }
    }
}

#[async_trait]
impl ExportTrigger for CommandExportTrigger {
    async fn trigger(&self) -> Result<(), AcquireError> {
        info!("Starting export session");
        let result = with_bounded_retries(
            "Export session",
            self.session.attempts,
            self.session.retry_delay,
            classify_session_error,
            |_| self.run_once(),
        )
        .await;

        match result {
            Ok(()) => Ok(()),
            Err((err @ AcquireError::ExportTimedOut(_), _)) => Err(err),
            Err((err, attempts)) => Err(AcquireError::ExportFailed {
                attempts,
                reason: match err {
                    AcquireError::ExportFailed { reason, .. } => reason,
                    other => other.to_string(),
                },
            }),
        }
    }
}

fn classify_session_error(err: &AcquireError) -> RetryDisposition {
    match err {
        AcquireError::Io(_) | AcquireError::ExportFailed { .. } => RetryDisposition::Retry,
        AcquireError::ExportTimedOut(_) | AcquireError::FileTimeout { .. } => {
            RetryDisposition::Stop
        }
    }
}
