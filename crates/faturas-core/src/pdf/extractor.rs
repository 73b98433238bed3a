//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::DocumentError;

/// Text-layer reader for PDF receipts.
///
/// Pages are decoded one at a time with lopdf. If lopdf cannot decode any
/// page, or decodes only blank text, the whole document goes through
/// pdf-extract instead.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Text of each page, in page order.
    pub fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let (doc, raw) = load(data)?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(DocumentError::NoPages);
        }

        let mut texts = Vec::with_capacity(pages.len());
        let mut undecodable = 0;

        for &number in pages.keys() {
            match doc.extract_text(&[number]) {
                Ok(text) => {
                    trace!("Page {}: {} chars", number, text.len());
                    texts.push(text);
                }
                Err(e) => {
                    trace!("Page {} has no decodable text: {}", number, e);
                    undecodable += 1;
                    texts.push(String::new());
                }
            }
        }

        if undecodable == pages.len() {
            debug!("lopdf decoded no pages, falling back to pdf-extract");
            let text = pdf_extract::extract_text_from_mem(&raw)
                .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;
            return Ok(vec![text]);
        }

        if texts.iter().all(|t| t.trim().is_empty()) {
            debug!("lopdf found no text, trying pdf-extract");
            match pdf_extract::extract_text_from_mem(&raw) {
                Ok(text) if !text.trim().is_empty() => return Ok(vec![text]),
                Ok(_) => trace!("pdf-extract found no text either"),
                Err(e) => trace!("pdf-extract failed on a blank document: {}", e),
            }
        }

        debug!(
            "Extracted {} pages, {} chars",
            texts.len(),
            texts.iter().map(String::len).sum::<usize>()
        );
        Ok(texts)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String> {
        Ok(self.extract_pages(data)?.join("\n"))
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

/// Parse the document, decrypting it when it uses an empty password.
///
/// Also returns the bytes pdf-extract should read: the decrypted copy for
/// encrypted input, the original otherwise.
fn load(data: &[u8]) -> Result<(Document, Cow<'_, [u8]>)> {
    let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

    if !doc.is_encrypted() {
        return Ok((doc, Cow::Borrowed(data)));
    }

    if doc.decrypt("").is_err() {
        return Err(DocumentError::Encrypted);
    }
    debug!("Decrypted PDF with empty password");

    let mut decrypted = Vec::new();
    doc.save_to(&mut decrypted)
        .map_err(|e| DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
    Ok((doc, Cow::Owned(decrypted)))
}
