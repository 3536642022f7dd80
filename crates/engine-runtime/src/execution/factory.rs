use connectors::{
    acquire::{
        Acquirer,
        download_dir::DownloadDirAcquirer,
        trigger::{CommandExportTrigger, ExportTrigger, ManualTrigger},
    },
    sink::{GridSink, local::StdoutSink, sheets::SheetsSink},
};
use engine_config::{error::ConfigError, sync::SyncConfig};
use std::sync::Arc;
use tracing::info;

pub fn create_trigger(config: &SyncConfig) -> Arc<dyn ExportTrigger> {
    match &config.export {
        Some(export) => Arc::new(CommandExportTrigger::new(
            export.command.clone(),
            config.acquire.download_dir.clone(),
            export.envs.clone(),
            config.session.clone(),
        )),
        None => Arc::new(ManualTrigger),
    }
}

pub fn create_acquirer(config: &SyncConfig) -> Arc<dyn Acquirer> {
    Arc::new(DownloadDirAcquirer::new(
        config.acquire.clone(),
        create_trigger(config),
    ))
}

/// The spreadsheet publisher, or stdout for a dry run.
pub fn create_sink(config: &SyncConfig, dry_run: bool) -> Result<Arc<dyn GridSink>, ConfigError> {
    if dry_run {
        info!("Dry run: writing the grid to stdout instead of the spreadsheet");
        return Ok(Arc::new(StdoutSink));
    }
    let settings = config.require_sheets()?;
    Ok(Arc::new(SheetsSink::new(settings.clone())))
}
