//! Fatal import errors.
//!
//! Only boundary failures live here. Per-row and per-sheet problems are
//! represented as data (warnings, error lists) so a human can review
//! partial results instead of the import aborting on the first bad row.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("file too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },
    #[error("failed to parse workbook: {0}")]
    Workbook(String),
    #[error("failed to parse csv: {0}")]
    Csv(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
