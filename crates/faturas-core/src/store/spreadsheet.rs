//! Spreadsheet-backed record store: one CSV sheet, one row per receipt.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info};

use super::{record_from_fields, RecordStore, Result};
use crate::error::StorageError;
use crate::models::receipt::ReceiptRecord;

/// Header row of a sheet created by this store.
pub const SHEET_HEADER: [&str; 4] = ["date", "total", "filename", "uploaded_at"];

/// Receipts kept as rows of a CSV sheet.
///
/// Sheets edited by hand are accepted. A header row naming `date` and
/// `total` maps columns by name, in any order; without one, columns are
/// read by position (`date, total, filename[, uploaded_at]`).
pub struct SpreadsheetStore {
    path: PathBuf,
}

impl SpreadsheetStore {
    /// Open a sheet, creating it with a header row if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut wtr = WriterBuilder::new().from_path(&path)?;
            wtr.write_record(SHEET_HEADER)?;
            wtr.flush()?;
            info!("Created sheet at {}", path.display());
        }

        Ok(Self { path })
    }

    /// Path of the backing sheet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows, including a header row if present.
    fn read_rows(&self) -> Result<Vec<StringRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for row in rdr.records() {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[StringRecord]) -> Result<()> {
        let mut wtr = WriterBuilder::new().flexible(true).from_path(&self.path)?;
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Where each field lives in a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    total: usize,
    filename: usize,
    uploaded_at: Option<usize>,
    /// Cells in a row written by this store.
    width: usize,
}

impl Columns {
    /// Layout of a headerless sheet: `date, total, filename[, uploaded_at]`.
    const POSITIONAL: Columns = Columns {
        date: 0,
        total: 1,
        filename: 2,
        uploaded_at: Some(3),
        width: 4,
    };

    /// Map columns by name when `row` is a header naming `date` and `total`.
    fn from_header(row: &StringRecord) -> Option<Self> {
        let position = |name: &str| {
            row.iter()
                .position(|f| f.trim().eq_ignore_ascii_case(name))
        };

        let date = position("date")?;
        let total = position("total")?;
        let filename = position("filename")
            .or_else(|| position("source_name"))
            .unwrap_or(Self::POSITIONAL.filename);

        Some(Self {
            date,
            total,
            filename,
            uploaded_at: position("uploaded_at"),
            width: row.len().max(filename + 1),
        })
    }

    /// Layout for `rows`, and whether the first row is a header.
    fn detect(rows: &[StringRecord]) -> (Self, bool) {
        match rows.first().and_then(Self::from_header) {
            Some(columns) => (columns, true),
            None => (Self::POSITIONAL, false),
        }
    }

    fn required(&self) -> usize {
        self.date.max(self.total).max(self.filename) + 1
    }

    fn row_for(&self, record: &ReceiptRecord) -> Vec<String> {
        let mut row = vec![String::new(); self.width];
        row[self.date] = record.date.format("%Y-%m-%d").to_string();
        row[self.total] = record.total.to_string();
        row[self.filename] = record.source_name.clone();
        if let Some(index) = self.uploaded_at.filter(|&i| i < self.width) {
            row[index] = record.uploaded_at.to_rfc3339();
        }
        row
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|f| f.trim().is_empty())
}

impl RecordStore for SpreadsheetStore {
    fn append(&mut self, record: &ReceiptRecord) -> Result<()> {
        let (columns, _) = Columns::detect(&self.read_rows()?);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        // A sheet saved without a trailing newline would glue rows together.
        let len = file.metadata()?.len();
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::Start(len - 1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
        wtr.write_record(columns.row_for(record))?;
        wtr.flush()?;

        info!(source_name = %record.source_name, date = %record.date, total = %record.total, "Receipt stored");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ReceiptRecord>> {
        let rows = self.read_rows()?;
        let (columns, has_header) = Columns::detect(&rows);
        let mut records = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let line = index + 1;
            if (index == 0 && has_header) || is_blank(row) {
                continue;
            }
            if row.len() < columns.required() {
                return Err(StorageError::InvalidRow {
                    row: line,
                    reason: format!(
                        "expected at least {} columns, found {}",
                        columns.required(),
                        row.len()
                    ),
                });
            }
            records.push(record_from_fields(
                line,
                &row[columns.date],
                &row[columns.total],
                &row[columns.filename],
                columns.uploaded_at.and_then(|i| row.get(i)),
            )?);
        }

        // Stable: rows with the same date stay in sheet order.
        records.sort_by_key(|r| r.date);
        debug!("Read {} receipts from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn delete_by_source_name(&mut self, source_name: &str) -> Result<usize> {
        let rows = self.read_rows()?;
        let (columns, has_header) = Columns::detect(&rows);
        let before = rows.len();

        let kept: Vec<StringRecord> = rows
            .into_iter()
            .enumerate()
            .filter(|(index, row)| {
                (*index == 0 && has_header) || row.get(columns.filename) != Some(source_name)
            })
            .map(|(_, row)| row)
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            self.write_rows(&kept)?;
        }

        info!(source_name, removed, "Receipts deleted");
        Ok(removed)
    }

    fn backend_name(&self) -> &str {
        "spreadsheet"
    }
}
