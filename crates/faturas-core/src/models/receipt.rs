//! Persisted receipt records.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::amount::MonetaryAmount;
use crate::receipt::ExtractionResult;

/// A receipt that resolved to both a date and a total.
///
/// Records are never mutated once created; they are removed by source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Purchase date printed on the receipt.
    pub date: NaiveDate,

    /// Amount paid.
    pub total: MonetaryAmount,

    /// File name of the uploaded document.
    pub source_name: String,

    /// When the document was ingested.
    pub uploaded_at: DateTime<Utc>,
}

impl ReceiptRecord {
    pub fn new(
        date: NaiveDate,
        total: MonetaryAmount,
        source_name: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            total,
            source_name: source_name.into(),
            uploaded_at,
        }
    }

    /// Build a record from a resolution result.
    ///
    /// Returns `None` unless both the date and the total were resolved.
    pub fn from_extraction(
        result: &ExtractionResult,
        source_name: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Option<Self> {
        match (result.date, result.total) {
            (Some(date), Some(total)) => Some(Self::new(date, total, source_name, uploaded_at)),
            _ => None,
        }
    }

    /// Calendar `(year, month)` of the purchase.
    pub fn period(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-02T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_from_complete_extraction() {
        let result = ExtractionResult {
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            total: Some("12.34".parse().unwrap()),
            total_source: None,
        };

        let record = ReceiptRecord::from_extraction(&result, "a.pdf", uploaded()).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(record.total.to_string(), "12.34");
        assert_eq!(record.source_name, "a.pdf");
        assert_eq!(record.period(), (2024, 3));
    }

    #[test]
    fn test_partial_extraction_is_not_a_record() {
        let no_total = ExtractionResult {
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            total: None,
            total_source: None,
        };
        let no_date = ExtractionResult {
            date: None,
            total: Some("1.00".parse().unwrap()),
            total_source: None,
        };

        assert!(ReceiptRecord::from_extraction(&no_total, "a.pdf", uploaded()).is_none());
        assert!(ReceiptRecord::from_extraction(&no_date, "a.pdf", uploaded()).is_none());
    }
}
