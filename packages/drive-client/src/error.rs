//! Typed errors for the Drive client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    /// No usable credentials, or the token exchange was rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Drive API
    #[error("Drive API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Building the workbook failed
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DriveError>;
