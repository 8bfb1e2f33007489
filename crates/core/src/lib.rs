//! `marketlens-core` — analytic domain foundation.
//!
//! Pure domain primitives shared by every analytic crate: typed identifiers,
//! the transaction-row input record, date ranges, and the error model. No
//! infrastructure concerns live here.

pub mod error;
pub mod id;
pub mod range;
pub mod row;

pub use error::{AnalyticsError, AnalyticsResult};
pub use id::{ItemId, SiteId, TransactionId};
pub use range::DateRange;
pub use row::TransactionRow;
