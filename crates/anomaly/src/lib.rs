//! `marketlens-anomaly` — daily rollups and z-score deviation flagging
//! (`sales_anomalies`).

pub mod detect;
pub mod rollup;

pub use detect::{AnomalyConfig, AnomalyRecord, sales_anomalies};
pub use rollup::{DailyRollup, daily_rollups};
