use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Unsupported encoding label: {0}")]
    UnsupportedEncoding(String),
    #[error("File is not valid {encoding}: {path}")]
    Decode { encoding: String, path: String },
}
