use crate::file::csv::error::FileError;
use encoding_rs::Encoding;

#[derive(Clone, Debug)]
pub struct CsvSettings {
    pub delimiter: char,
    pub has_headers: bool,
    pub encoding: &'static Encoding,
}

impl CsvSettings {
    pub fn new(delimiter: char, has_headers: bool, encoding: &'static Encoding) -> Self {
        CsvSettings {
            delimiter,
            has_headers,
            encoding,
        }
    }

    /// Comma-separated export with a header row in the given encoding
    /// (a WHATWG label such as `Shift_JIS`).
    pub fn export(encoding_label: &str) -> Result<Self, FileError> {
        let encoding = Encoding::for_label(encoding_label.trim().as_bytes())
            .ok_or_else(|| FileError::UnsupportedEncoding(encoding_label.to_string()))?;
        Ok(CsvSettings::new(',', true, encoding))
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings::new(',', true, encoding_rs::SHIFT_JIS)
    }
}
