#![allow(dead_code)]

use engine_config::sync::{
    WMS_DOWNLOAD_DIR, WMS_EXPORT_COMMAND, WMS_FILE_POLL_MILLIS, WMS_FILE_TIMEOUT_SECS,
    WMS_SETUP_RETRY_SECS,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub mod utils;

/// Header row of the portal's inventory export.
pub const EXPORT_HEADER: &str = "ID,品番,商品名,商品規格１,商品規格２,バーコード,ロケーション1,ロケーション2,実在庫数";

/// Scratch space for one scenario: a download directory the export lands in
/// and a separate staging directory holding the file the fake portal copies.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("staging")).expect("create staging dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn download_dir(&self) -> PathBuf {
        self.dir.path().join("downloads")
    }

    pub fn staged_export(&self) -> PathBuf {
        self.dir.path().join("staging").join("zaiko_20240501.csv")
    }

    /// Stages `rows` under the export header, encoded as Shift_JIS.
    pub fn stage_export(&self, rows: &[&str]) -> PathBuf {
        let mut text = String::from(EXPORT_HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');

        let path = self.staged_export();
        std::fs::write(&path, utils::shift_jis(&text)).expect("write staged export");
        path
    }

    /// Environment for a run whose "portal" copies the staged export into
    /// the download directory.
    pub fn vars(&self) -> HashMap<String, String> {
        let command = format!(
            "cp '{}' \"$WMS_DOWNLOAD_DIR/zaiko_20240501.csv\"",
            self.staged_export().display()
        );
        let download_dir = self.download_dir().display().to_string();
        utils::vars(&[
            (WMS_DOWNLOAD_DIR, download_dir.as_str()),
            (WMS_EXPORT_COMMAND, command.as_str()),
            (WMS_FILE_TIMEOUT_SECS, "5"),
            (WMS_FILE_POLL_MILLIS, "20"),
            (WMS_SETUP_RETRY_SECS, "0"),
        ])
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
