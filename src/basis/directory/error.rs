use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that can occur while collecting input,
/// talking to the directory API, or writing the export.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading prompts or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport, HTTP status, or payload decoding failures from either
    /// endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the page or per-page value is not a positive integer.
    #[error("invalid value '{value}' for {field}")]
    InvalidInput { field: &'static str, value: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
