//! Dense per-day sales rollups.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::{DateRange, TransactionId, TransactionRow};

/// Totals for one calendar day. The rollup sequence is dense: every day of
/// the requested range is present, zero-filled when nothing sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: NaiveDate,
    pub total_quantity: f64,
    pub total_sales: f64,
    pub transaction_count: u64,
}

/// One rollup per day of `range`, in date order.
///
/// Rows outside the range are ignored (the upstream query layer normally
/// pre-filters); rows missing a transaction id are skipped and counted, since
/// distinct-receipt counting needs the key.
pub fn daily_rollups(rows: &[TransactionRow], range: &DateRange) -> Vec<DailyRollup> {
    struct DayAcc<'a> {
        total_quantity: f64,
        total_sales: f64,
        transactions: BTreeSet<&'a TransactionId>,
    }

    let mut days: BTreeMap<NaiveDate, DayAcc<'_>> = BTreeMap::new();
    let mut skipped_rows = 0u64;

    for row in rows {
        let date = row.sale_date();
        if !range.contains(date) {
            continue;
        }
        let tx = match row.transaction_key() {
            Ok(tx) => tx,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        let acc = days.entry(date).or_insert_with(|| DayAcc {
            total_quantity: 0.0,
            total_sales: 0.0,
            transactions: BTreeSet::new(),
        });
        acc.total_quantity += row.quantity;
        acc.total_sales += row.gross_amount;
        acc.transactions.insert(tx);
    }

    if skipped_rows > 0 {
        debug!(skipped_rows, "skipped rows with missing transaction id");
    }

    range
        .days()
        .map(|date| match days.get(&date) {
            Some(acc) => DailyRollup {
                date,
                total_quantity: acc.total_quantity,
                total_sales: acc.total_sales,
                transaction_count: acc.transactions.len() as u64,
            },
            None => DailyRollup {
                date,
                total_quantity: 0.0,
                total_sales: 0.0,
                transaction_count: 0,
            },
        })
        .collect()
}
