#![allow(dead_code)]

use engine_config::sync::SyncConfig;
use engine_processing::normalizer::Normalizer;
use engine_runtime::execution::{executor::SyncExecutor, factory, outcome::RunOutcome};
use connectors::sink::local::CsvFileSink;
use std::{collections::HashMap, path::Path, sync::Arc};
use tokio_util::sync::CancellationToken;

pub fn shift_jis(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors, "text is not representable in Shift_JIS");
    bytes.into_owned()
}

pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn with(mut vars: HashMap<String, String>, pairs: &[(&str, &str)]) -> HashMap<String, String> {
    for (k, v) in pairs {
        vars.insert(k.to_string(), v.to_string());
    }
    vars
}

/// Runs one sync with the real acquirer and normalizer, writing the grid to
/// `output` as CSV instead of the spreadsheet.
pub async fn run_to_csv(vars: &HashMap<String, String>, output: &Path) -> RunOutcome {
    let config = SyncConfig::from_vars(vars).expect("valid config");
    let normalizer = Normalizer::new(&config.schema).expect("valid schema");

    SyncExecutor::new(
        factory::create_acquirer(&config),
        normalizer,
        Arc::new(CsvFileSink::new(output)),
        config.timezone,
    )
    .with_cancel(CancellationToken::new())
    .execute()
    .await
}

/// Lines of a CSV written by the file sink, banner line excluded.
pub fn grid_lines(output: &Path) -> Vec<String> {
    let written = std::fs::read_to_string(output).expect("read output");
    let mut lines = written.lines();
    let banner = lines.next().expect("banner line");
    assert!(banner.starts_with("Last Updated: "), "unexpected banner {banner:?}");
    lines.map(str::to_string).collect()
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
