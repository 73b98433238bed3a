//! Receipt record storage.

mod spreadsheet;
mod sqlite;

pub use spreadsheet::{SpreadsheetStore, SHEET_HEADER};
pub use sqlite::SqliteStore;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::error::StorageError;
use crate::models::amount::MonetaryAmount;
use crate::models::config::{StorageBackend, StorageConfig};
use crate::models::receipt::ReceiptRecord;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A backend that keeps receipt records.
///
/// Only complete records can be appended, so everything listed has a
/// date and a non-negative total.
pub trait RecordStore {
    /// Append one record. Each call is atomic.
    fn append(&mut self, record: &ReceiptRecord) -> Result<()>;

    /// All records ordered by date ascending. Records sharing a date keep
    /// insertion order.
    fn list_all(&self) -> Result<Vec<ReceiptRecord>>;

    /// Remove every record with this source name; returns how many.
    fn delete_by_source_name(&mut self, source_name: &str) -> Result<usize>;

    /// Short name used in logs.
    fn backend_name(&self) -> &str;
}

/// Open the backend named in the configuration.
///
/// The store is released when the returned box is dropped.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match &config.backend {
        StorageBackend::Sqlite { path } => Box::new(SqliteStore::open(path)?),
        StorageBackend::Spreadsheet { path } => Box::new(SpreadsheetStore::open(path)?),
    };

    info!(backend = store.backend_name(), "Opened record store");
    Ok(store)
}

/// Rebuild a record from stored text fields.
///
/// `row` is only used in error messages. Dates may carry a time suffix
/// (`2024-03-01 00:00:00`); a missing or empty `uploaded_at` reads as the
/// Unix epoch.
fn record_from_fields(
    row: usize,
    date: &str,
    total: &str,
    source_name: &str,
    uploaded_at: Option<&str>,
) -> Result<ReceiptRecord> {
    let date = date.trim();
    let date = NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d").map_err(
        |e| StorageError::InvalidRow {
            row,
            reason: format!("bad date {:?}: {}", date, e),
        },
    )?;

    let total = total
        .parse::<MonetaryAmount>()
        .map_err(|e| StorageError::InvalidRow {
            row,
            reason: e.to_string(),
        })?;

    let uploaded_at = match uploaded_at.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| StorageError::InvalidRow {
                row,
                reason: format!("bad uploaded_at {:?}: {}", s, e),
            })?,
        None => DateTime::<Utc>::default(),
    };

    Ok(ReceiptRecord::new(date, total, source_name, uploaded_at))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    pub(crate) fn record(date: &str, total: &str, source_name: &str) -> ReceiptRecord {
        ReceiptRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total.parse().unwrap(),
            source_name,
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        )
    }

    /// Contract every backend must satisfy.
    pub(crate) fn exercise_store(store: &mut dyn RecordStore) {
        assert!(store.list_all().unwrap().is_empty());

        store.append(&record("2024-03-10", "20.00", "b.pdf")).unwrap();
        store.append(&record("2024-01-05", "5.50", "a.pdf")).unwrap();
        store.append(&record("2024-03-10", "7.25", "c.pdf")).unwrap();
        store.append(&record("2024-02-01", "1.00", "a.pdf")).unwrap();

        let listed = store.list_all().unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(listed[0], record("2024-01-05", "5.50", "a.pdf"));
        assert_eq!(listed[3].total.to_string(), "7.25");

        assert_eq!(store.delete_by_source_name("a.pdf").unwrap(), 2);
        assert_eq!(store.delete_by_source_name("missing.pdf").unwrap(), 0);

        let listed = store.list_all().unwrap();
        assert!(listed.iter().all(|r| r.source_name != "a.pdf"));
        assert_eq!(listed.len(), 2);

        // Source names are kept verbatim, surrounding spaces included.
        store.append(&record("2024-04-01", "1.00", " spaced.pdf ")).unwrap();
        let listed = store.list_all().unwrap();
        assert_eq!(listed[2].source_name, " spaced.pdf ");
        assert_eq!(store.delete_by_source_name("spaced.pdf").unwrap(), 0);
        assert_eq!(store.delete_by_source_name(" spaced.pdf ").unwrap(), 1);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_record_from_fields() {
        let r = record_from_fields(1, "2024-03-01", "12.5", "x.pdf", None).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(r.total.to_string(), "12.50");
        assert_eq!(r.uploaded_at, DateTime::<Utc>::default());

        let r = record_from_fields(1, "2024-03-01 00:00:00", "1", "x.pdf", Some("")).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_record_from_fields_rejects_bad_values() {
        assert!(matches!(
            record_from_fields(3, "01/03/2024", "1.00", "x.pdf", None),
            Err(StorageError::InvalidRow { row: 3, .. })
        ));
        assert!(matches!(
            record_from_fields(4, "2024-03-01", "-1.00", "x.pdf", None),
            Err(StorageError::InvalidRow { row: 4, .. })
        ));
        assert!(matches!(
            record_from_fields(5, "2024-03-01", "1.00", "x.pdf", Some("yesterday")),
            Err(StorageError::InvalidRow { row: 5, .. })
        ));
    }

    #[test]
    fn test_open_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Spreadsheet {
                path: dir.path().join("sheet.csv"),
            },
        };

        let mut store = open_store(&config).unwrap();
        assert_eq!(store.backend_name(), "spreadsheet");
        store.append(&record("2024-01-01", "1.00", "a.pdf")).unwrap();
        drop(store);

        let store = open_store(&config).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
