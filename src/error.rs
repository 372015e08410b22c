use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool discovers, normalizes, or exports inventory data.
///
/// Per-source problems during a batch run are deliberately *not* variants
/// here: they are captured as [`SourceWarning`](crate::model::SourceWarning)
/// values so one broken spreadsheet never aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as listing directories or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when a workbook does not contain a readable worksheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a mapping configuration file is structurally invalid.
    #[error("invalid mapping configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input path not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when, after processing every source, the catalog is empty.
    #[error("no inventory data available: {0}")]
    NoData(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
