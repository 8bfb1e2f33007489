//! `marketlens-reports` — supplemental aggregations over scoped rows:
//! hour-of-day profiles, revenue leaders, and zero-sales gap detection.

pub mod gaps;
pub mod hourly;
pub mod top;

pub use gaps::sales_gaps;
pub use hourly::{DEFAULT_PEAK_HOURS_TOP_N, HourlyBucket, hourly_sales, peak_hours};
pub use top::{DEFAULT_TOP_ITEMS_LIMIT, top_items};
