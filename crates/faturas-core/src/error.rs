//! Error types for the faturas-core library.

use thiserror::Error;

/// Main error type for the faturas library.
#[derive(Error, Debug)]
pub enum FaturasError {
    /// Document (PDF) reading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Record store error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// CSV export error.
    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The byte stream could not be read as a document with a text layer.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to read the document from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The record store rejected a read or write.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite backend failure.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Spreadsheet (CSV sheet) backend failure.
    #[error("spreadsheet: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure on the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row could not be turned back into a record.
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// A monetary amount outside the accepted domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Amounts are never negative.
    #[error("negative amount: {0}")]
    Negative(String),

    /// Larger than any receipt total.
    #[error("amount too large: {0}")]
    TooLarge(String),

    /// Text that does not parse as a decimal.
    #[error("not a decimal amount: {0:?}")]
    Unparseable(String),
}

/// Result type for the faturas library.
pub type Result<T> = std::result::Result<T, FaturasError>;
