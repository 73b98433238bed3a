//! Core library for Continente receipt ingestion.
//!
//! This crate provides:
//! - PDF text extraction
//! - Receipt date and total resolution from unstructured text
//! - Receipt records and the SQLite / spreadsheet record stores
//! - Batch ingestion with per-document outcomes
//! - Monthly and yearly spending summaries and CSV export

pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod receipt;
pub mod report;
pub mod store;

pub use error::{AmountError, DocumentError, FaturasError, Result, StorageError};
pub use models::amount::MonetaryAmount;
pub use models::config::{FaturasConfig, StorageBackend, StorageConfig};
pub use models::receipt::ReceiptRecord;
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use pipeline::{BatchReport, Document, DocumentOutcome, ReceiptPipeline};
pub use receipt::{ExtractionResult, FieldResolver, TotalSource};
pub use report::{MonthlyTotal, SpendingSummary, YearlyTotal};
pub use store::{open_store, RecordStore, SpreadsheetStore, SqliteStore};
