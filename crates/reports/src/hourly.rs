//! Hour-of-day sales profile.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use marketlens_core::{AnalyticsError, AnalyticsResult, TransactionId, TransactionRow};

/// Default number of hours returned by `peak_hours`.
pub const DEFAULT_PEAK_HOURS_TOP_N: usize = 5;

/// Totals for one hour of the day (0..=23).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub total_quantity: f64,
    pub total_sales: f64,
    pub transaction_count: u64,
}

/// Sales aggregated per hour of day, hour ascending. Hours with no sales are
/// omitted (callers wanting a dense profile can zero-fill 24 buckets).
pub fn hourly_sales(rows: &[TransactionRow]) -> Vec<HourlyBucket> {
    struct HourAcc<'a> {
        total_quantity: f64,
        total_sales: f64,
        transactions: BTreeSet<&'a TransactionId>,
    }

    let mut hours: BTreeMap<u32, HourAcc<'_>> = BTreeMap::new();
    for row in rows {
        let Ok(tx) = row.transaction_key() else {
            continue;
        };
        let acc = hours.entry(row.timestamp.hour()).or_insert_with(|| HourAcc {
            total_quantity: 0.0,
            total_sales: 0.0,
            transactions: BTreeSet::new(),
        });
        acc.total_quantity += row.quantity;
        acc.total_sales += row.gross_amount;
        acc.transactions.insert(tx);
    }

    hours
        .into_iter()
        .map(|(hour, acc)| HourlyBucket {
            hour,
            total_quantity: acc.total_quantity,
            total_sales: acc.total_sales,
            transaction_count: acc.transactions.len() as u64,
        })
        .collect()
}

/// The `top_n` busiest hours by total sales, sales descending, hour ascending
/// on ties.
pub fn peak_hours(rows: &[TransactionRow], top_n: usize) -> AnalyticsResult<Vec<HourlyBucket>> {
    if top_n == 0 {
        return Err(AnalyticsError::invalid_limit("top_n must be positive"));
    }
    let mut buckets = hourly_sales(rows);
    buckets.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then_with(|| a.hour.cmp(&b.hour))
    });
    buckets.truncate(top_n);
    Ok(buckets)
}
