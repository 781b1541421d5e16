use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocError>;

#[derive(Error, Debug)]
pub enum LocError {
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Data source unavailable: {}: {source}", path.display())]
    DataSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl LocError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        LocError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LocError::DataSourceUnavailable {
            path: path.into(),
            source,
        }
    }
}
