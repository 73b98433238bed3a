//! CSV export of receipt records.

use std::io::Write;

use csv::WriterBuilder;

use crate::models::receipt::ReceiptRecord;
use crate::Result;

/// Header row, matching the `ReceiptRecord` field names.
pub const EXPORT_HEADER: [&str; 4] = ["date", "total", "source_name", "uploaded_at"];

/// Write a header row and one row per record.
pub fn write_csv<W: Write>(records: &[ReceiptRecord], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// [`write_csv`] into a string.
pub fn to_csv_string(records: &[ReceiptRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
