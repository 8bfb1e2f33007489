//! Statistical deviation flagging over the daily sales series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::{AnalyticsError, AnalyticsResult, DateRange, TransactionRow};

use crate::rollup::daily_rollups;

/// Parameters for `sales_anomalies`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Deviation threshold in standard-deviation units.
    pub z_score: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { z_score: 2.0 }
    }
}

impl AnomalyConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.z_score.is_finite() && self.z_score > 0.0) {
            return Err(AnalyticsError::threshold(format!(
                "z_score must be a finite positive number, got {}",
                self.z_score
            )));
        }
        Ok(())
    }
}

/// One anomalous day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub total_sales: f64,
    /// |total_sales - mean| / stddev, in standard-deviation units.
    pub deviation: f64,
}

/// Days whose total sales deviate from the period mean by more than
/// `z_score` population standard deviations.
///
/// Zero-sales days count toward the baseline (the rollup range is dense).
/// A zero standard deviation, including the degenerate single-day case,
/// flags nothing. Output order: deviation descending, date ascending.
pub fn sales_anomalies(
    rows: &[TransactionRow],
    range: &DateRange,
    config: &AnomalyConfig,
) -> AnalyticsResult<Vec<AnomalyRecord>> {
    config.validate()?;

    let rollups = daily_rollups(rows, range);
    let totals: Vec<f64> = rollups.iter().map(|r| r.total_sales).collect();
    let mean = mean(&totals);
    let stddev = stddev_population(&totals, mean);
    if stddev <= 0.0 {
        debug!(days = rollups.len(), "zero variance, no anomalies");
        return Ok(Vec::new());
    }

    let mut anomalies: Vec<AnomalyRecord> = rollups
        .into_iter()
        .filter_map(|rollup| {
            let deviation = (rollup.total_sales - mean).abs() / stddev;
            (deviation > config.z_score).then_some(AnomalyRecord {
                date: rollup.date,
                total_sales: rollup.total_sales,
                deviation,
            })
        })
        .collect();
    anomalies.sort_by(|a, b| {
        b.deviation
            .total_cmp(&a.deviation)
            .then_with(|| a.date.cmp(&b.date))
    });
    debug!(anomalies = anomalies.len(), mean, stddev, "anomaly scan complete");
    Ok(anomalies)
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (divisor n), deterministic.
fn stddev_population(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::{ItemId, TransactionId};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn day_row(day: u32, amount: f64) -> TransactionRow {
        TransactionRow {
            transaction_id: Some(TransactionId::new(format!("T-{day}"))),
            site_id: None,
            item_id: Some(ItemId::new(1)),
            item_name: "item".to_string(),
            category: None,
            quantity: 1.0,
            unit_price: amount,
            gross_amount: amount,
            timestamp: format!("2024-03-{day:02}T12:00:00Z").parse().unwrap(),
        }
    }

    fn series(totals: &[f64]) -> (Vec<TransactionRow>, DateRange) {
        let rows: Vec<TransactionRow> = totals
            .iter()
            .enumerate()
            .map(|(i, &total)| day_row(i as u32 + 1, total))
            .collect();
        let range = DateRange::new(d(1), d(totals.len() as u32)).unwrap();
        (rows, range)
    }

    #[test]
    fn flags_only_the_outlier_day() {
        // Seven quiet days and one spike: mean 21.25, population stddev
        // ~29.77, spike z ~2.65, quiet-day z ~0.38.
        let (rows, range) = series(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 100.0]);
        let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig { z_score: 2.0 }).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date, d(8));
        assert_eq!(anomalies[0].total_sales, 100.0);
        assert!((anomalies[0].deviation - 2.6458).abs() < 1e-3);
    }

    #[test]
    fn zero_variance_flags_nothing() {
        let (rows, range) = series(&[10.0, 10.0, 10.0, 10.0]);
        for z in [0.1, 1.0, 5.0] {
            let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig { z_score: z }).unwrap();
            assert!(anomalies.is_empty());
        }
    }

    #[test]
    fn single_day_flags_nothing() {
        let (rows, range) = series(&[42.0]);
        let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig::default()).unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn empty_days_participate_in_the_baseline() {
        // Three zero-filled days pull the mean down; day 4 is the spike.
        let rows = vec![day_row(4, 80.0)];
        let range = DateRange::new(d(1), d(4)).unwrap();
        let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig { z_score: 1.5 }).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date, d(4));
        // Max attainable z over 4 points is sqrt(3).
        assert!((anomalies[0].deviation - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn invalid_z_score_is_rejected_before_scanning() {
        let (rows, range) = series(&[10.0, 20.0]);
        for z in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = sales_anomalies(&rows, &range, &AnomalyConfig { z_score: z }).unwrap_err();
            assert!(matches!(err, AnalyticsError::ThresholdOutOfRange(_)));
        }
    }

    #[test]
    fn anomalies_sort_by_deviation_descending() {
        let (rows, range) = series(&[
            10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 120.0, 90.0,
        ]);
        let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig { z_score: 1.5 }).unwrap();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].date, d(9));
        assert_eq!(anomalies[1].date, d(10));
        assert!(anomalies[0].deviation > anomalies[1].deviation);
    }

    #[test]
    fn records_serialize_flat() {
        let (rows, range) = series(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 100.0]);
        let anomalies = sales_anomalies(&rows, &range, &AnomalyConfig::default()).unwrap();
        let value = serde_json::to_value(&anomalies[0]).unwrap();
        assert_eq!(value["date"], serde_json::json!("2024-03-08"));
        assert_eq!(value["total_sales"], serde_json::json!(100.0));
    }
}
