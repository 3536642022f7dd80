use crate::file::csv::{error::FileError, metadata::normalize_headers, settings::CsvSettings};
use model::{core::value::Value, records::table::Table};
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait FileDataSource {
    type Error;

    /// Reads the whole file into a table.
    fn load(&self) -> Result<Table, Self::Error>;
}

/// A delimited export file in a legacy encoding.
pub struct CsvDataSource {
    pub path: PathBuf,
    pub settings: CsvSettings,
}

impl CsvDataSource {
    pub fn new(path: impl Into<PathBuf>, settings: CsvSettings) -> Self {
        CsvDataSource {
            path: path.into(),
            settings,
        }
    }
}

impl FileDataSource for CsvDataSource {
    type Error = FileError;

    fn load(&self) -> Result<Table, Self::Error> {
        let bytes = std::fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(self.path.display().to_string()),
            _ => FileError::IoError(e),
        })?;
        let text = decode(&bytes, &self.settings, &self.path)?;
        let table = parse_table(&text, &self.settings)?;

        debug!(
            "Loaded {} rows x {} columns from {}",
            table.len(),
            table.header().len(),
            self.path.display()
        );
        Ok(table)
    }
}

/// Strict decode: malformed byte sequences are an error, never replaced.
pub fn decode(bytes: &[u8], settings: &CsvSettings, path: &Path) -> Result<String, FileError> {
    let text = settings
        .encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| FileError::Decode {
            encoding: settings.encoding.name().to_string(),
            path: path.display().to_string(),
        })?;

    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Parses decoded CSV text. Short rows are padded with empty cells; a row
/// wider than the header is rejected.
///
/// Without a header row the columns are labelled `Unnamed: {idx}` after the
/// width of the first record, and that record is kept as data.
pub fn parse_table(text: &str, settings: &CsvSettings) -> Result<Table, FileError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(settings.delimiter as u8)
        .has_headers(settings.has_headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    // With `has_headers(false)` this peeks at the first record; `records()`
    // still yields it.
    let raw_headers = reader.headers()?.clone();
    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FileError::InvalidFormat("No columns to parse from file".into()));
    }

    let header = if settings.has_headers {
        normalize_headers(raw_headers.iter())
    } else {
        normalize_headers(std::iter::repeat_n("", raw_headers.len()))
    };
    let width = header.len();
    let mut table = Table::new(header);

    for record in reader.records() {
        let record = record?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(FileError::InvalidFormat(format!(
                "Expected {width} fields in line {line}, saw {}",
                record.len()
            )));
        }
        table.push_row(record.iter().map(Value::from_cell).collect());
    }

    Ok(table)
}
