//! PDF text extraction module.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::DocumentError;

/// Result type for document reading.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Turns raw document bytes into plain text.
pub trait TextExtractor {
    /// Extract the text of every page, pages separated by `\n`.
    ///
    /// Pages without text contribute an empty string. Only unreadable
    /// documents are errors.
    fn extract(&self, data: &[u8]) -> Result<String>;

    /// Short name used in logs.
    fn backend_name(&self) -> &str;
}
