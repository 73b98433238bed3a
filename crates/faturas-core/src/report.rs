//! Monthly and yearly spending summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::amount::MonetaryAmount;
use crate::models::receipt::ReceiptRecord;

/// Spending in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: MonetaryAmount,
    pub receipts: usize,
}

impl MonthlyTotal {
    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Spending in one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total: MonetaryAmount,
    pub receipts: usize,
}

/// Sum totals per `(year, month)`, ascending. Months without receipts are
/// not listed.
pub fn monthly_totals(records: &[ReceiptRecord]) -> Vec<MonthlyTotal> {
    let mut groups: BTreeMap<(i32, u32), (MonetaryAmount, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.period()).or_default();
        entry.0 = entry.0 + record.total;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((year, month), (total, receipts))| MonthlyTotal {
            year,
            month,
            total,
            receipts,
        })
        .collect()
}

/// Sum totals per year, ascending.
pub fn yearly_totals(records: &[ReceiptRecord]) -> Vec<YearlyTotal> {
    let mut groups: BTreeMap<i32, (MonetaryAmount, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.period().0).or_default();
        entry.0 = entry.0 + record.total;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(year, (total, receipts))| YearlyTotal {
            year,
            total,
            receipts,
        })
        .collect()
}

/// Everything the report screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingSummary {
    pub monthly: Vec<MonthlyTotal>,
    pub yearly: Vec<YearlyTotal>,
    pub receipt_count: usize,
    pub grand_total: MonetaryAmount,
}

impl SpendingSummary {
    pub fn from_records(records: &[ReceiptRecord]) -> Self {
        Self {
            monthly: monthly_totals(records),
            yearly: yearly_totals(records),
            receipt_count: records.len(),
            grand_total: records.iter().map(|r| r.total).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.receipt_count == 0
    }
}
