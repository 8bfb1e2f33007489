//! Zero-sales gap detection.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use marketlens_core::{DateRange, TransactionRow};

/// Dates within `range` that have no recorded sales, ascending.
pub fn sales_gaps(rows: &[TransactionRow], range: &DateRange) -> Vec<NaiveDate> {
    let covered: BTreeSet<NaiveDate> = rows
        .iter()
        .map(TransactionRow::sale_date)
        .filter(|date| range.contains(*date))
        .collect();
    range.days().filter(|day| !covered.contains(day)).collect()
}
