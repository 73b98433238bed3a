//! Table-backed record store on SQLite.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::{record_from_fields, RecordStore, Result};
use crate::models::receipt::ReceiptRecord;

/// Receipts kept in a `receipts` table.
///
/// Dates are ISO-8601 text, totals fixed two-decimal text and
/// `uploaded_at` RFC 3339.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        debug!("Opened SQLite database at {}", db_path.as_ref().display());
        Self::init(conn)
    }

    /// A private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS receipts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                total TEXT NOT NULL,
                filename TEXT NOT NULL,
                uploaded_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_receipts_date ON receipts(date)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_receipts_filename ON receipts(filename)",
            [],
        )?;

        info!("Receipt table ready");
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn append(&mut self, record: &ReceiptRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO receipts (date, total, filename, uploaded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.date.format("%Y-%m-%d").to_string(),
                record.total.to_string(),
                record.source_name,
                record.uploaded_at.to_rfc3339(),
            ],
        )?;
        info!(source_name = %record.source_name, date = %record.date, total = %record.total, "Receipt stored");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ReceiptRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, total, filename, uploaded_at FROM receipts ORDER BY date, id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, date, total, filename, uploaded_at) = row?;
            records.push(record_from_fields(
                id as usize,
                &date,
                &total,
                &filename,
                Some(&uploaded_at),
            )?);
        }
        Ok(records)
    }

    fn delete_by_source_name(&mut self, source_name: &str) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM receipts WHERE filename = ?1", params![source_name])?;
        info!(source_name, removed, "Receipts deleted");
        Ok(removed)
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}
