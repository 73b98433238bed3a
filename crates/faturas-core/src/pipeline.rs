//! Batch ingestion: extract, resolve and store each uploaded receipt.
//!
//! Documents are handled one after another. A failing document never
//! stops the batch; every outcome is collected and reported at the end.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{DocumentError, StorageError};
use crate::models::receipt::ReceiptRecord;
use crate::pdf::TextExtractor;
use crate::receipt::{ExtractionResult, FieldResolver};
use crate::store::RecordStore;

/// An uploaded document.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name, used as the deletion key once stored.
    pub source_name: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(source_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source_name: source_name.into(),
            bytes,
        }
    }

    /// Read a document from disk. The file name becomes the source name.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path)?;
        Ok(Self::new(source_name_of(path), bytes))
    }
}

/// File name component of `path`, or the whole path if it has none.
pub fn source_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// What happened to one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// Both fields resolved and the record was stored.
    Stored(ReceiptRecord),

    /// Date and/or total could not be resolved; nothing was stored.
    Unresolved {
        source_name: String,
        result: ExtractionResult,
    },

    /// The bytes were not a readable document.
    ReadFailed {
        source_name: String,
        error: DocumentError,
    },

    /// The store rejected the record.
    StorageFailed {
        source_name: String,
        record: ReceiptRecord,
        error: StorageError,
    },
}

impl DocumentOutcome {
    pub fn source_name(&self) -> &str {
        match self {
            Self::Stored(record) => &record.source_name,
            Self::Unresolved { source_name, .. }
            | Self::ReadFailed { source_name, .. }
            | Self::StorageFailed { source_name, .. } => source_name,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Records that were stored.
    pub fn stored(&self) -> impl Iterator<Item = &ReceiptRecord> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Stored(record) => Some(record),
            _ => None,
        })
    }

    /// Every outcome that did not store a record.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_stored())
    }

    pub fn stored_count(&self) -> usize {
        self.stored().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Drives text extraction, field resolution and storage.
pub struct ReceiptPipeline<E> {
    extractor: E,
    resolver: FieldResolver,
}

impl<E: TextExtractor> ReceiptPipeline<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            resolver: FieldResolver::new(),
        }
    }

    /// Extract and resolve without storing. Returns the text as well so it
    /// can be shown to whoever reviews the result.
    pub fn inspect(&self, bytes: &[u8]) -> Result<(String, ExtractionResult), DocumentError> {
        let text = self.extractor.extract(bytes)?;
        let result = self.resolver.resolve(&text);
        Ok((text, result))
    }

    /// Process one document into `store`.
    pub fn process_document(
        &self,
        doc: &Document,
        store: &mut dyn RecordStore,
        uploaded_at: DateTime<Utc>,
    ) -> DocumentOutcome {
        let source_name = doc.source_name.clone();
        debug!(
            source_name = %source_name,
            bytes = doc.bytes.len(),
            backend = self.extractor.backend_name(),
            "Processing document"
        );

        let result = match self.inspect(&doc.bytes) {
            Ok((_, result)) => result,
            Err(error) => {
                warn!(source_name = %source_name, "Could not read document: {}", error);
                return DocumentOutcome::ReadFailed { source_name, error };
            }
        };

        let Some(record) = ReceiptRecord::from_extraction(&result, &source_name, uploaded_at)
        else {
            warn!(
                source_name = %source_name,
                missing = ?result.missing_fields(),
                "Receipt fields unresolved, not stored"
            );
            return DocumentOutcome::Unresolved {
                source_name,
                result,
            };
        };

        match store.append(&record) {
            Ok(()) => DocumentOutcome::Stored(record),
            Err(error) => {
                warn!(
                    source_name = %source_name,
                    backend = store.backend_name(),
                    "Could not store receipt: {}",
                    error
                );
                DocumentOutcome::StorageFailed {
                    source_name,
                    record,
                    error,
                }
            }
        }
    }

    /// Process documents in order, calling `on_outcome` after each one.
    pub fn process_batch_with<I, F>(
        &self,
        docs: I,
        store: &mut dyn RecordStore,
        mut on_outcome: F,
    ) -> BatchReport
    where
        I: IntoIterator<Item = Document>,
        F: FnMut(&DocumentOutcome),
    {
        let mut report = BatchReport::default();

        for doc in docs {
            let outcome = self.process_document(&doc, store, Utc::now());
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        info!(
            stored = report.stored_count(),
            failed = report.failure_count(),
            "Batch complete"
        );
        report
    }

    /// Process documents in order.
    pub fn process_batch<I>(&self, docs: I, store: &mut dyn RecordStore) -> BatchReport
    where
        I: IntoIterator<Item = Document>,
    {
        self.process_batch_with(docs, store, |_| {})
    }

    /// Process files in order. A file that cannot be read is reported as a
    /// read failure like any other unreadable document.
    pub fn process_paths<P, F>(
        &self,
        paths: &[P],
        store: &mut dyn RecordStore,
        mut on_outcome: F,
    ) -> BatchReport
    where
        P: AsRef<Path>,
        F: FnMut(&DocumentOutcome),
    {
        let mut report = BatchReport::default();

        for path in paths {
            let path = path.as_ref();
            let outcome = match Document::from_path(path) {
                Ok(doc) => self.process_document(&doc, store, Utc::now()),
                Err(error) => {
                    warn!("Could not read {}: {}", path.display(), error);
                    DocumentOutcome::ReadFailed {
                        source_name: source_name_of(path),
                        error,
                    }
                }
            };
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        info!(
            stored = report.stored_count(),
            failed = report.failure_count(),
            "Batch complete"
        );
        report
    }
}
