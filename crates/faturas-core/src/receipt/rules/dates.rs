//! Purchase date extraction.

use chrono::NaiveDate;

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Only the first date-shaped substring counts. If it is not a real
/// calendar date the receipt has no date; later candidates are not tried.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let m = DATE_DMY.find(text)?;
        let date = parse_receipt_date(m.as_str())?;
        Some(ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .find_iter(text)
            .filter_map(|m| {
                parse_receipt_date(m.as_str()).map(|date| {
                    ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Parse `DD/MM/YYYY`, accepting `-` for either separator.
pub fn parse_receipt_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&s.replace('-', "/"), "%d/%m/%Y").ok()
}
