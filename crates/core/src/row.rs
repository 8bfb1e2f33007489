//! Raw point-of-sale line item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::id::{ItemId, SiteId, TransactionId};

/// One sold line from the upstream sales fact view.
///
/// Produced by the external data-access collaborator, already restricted to
/// the caller's date/site scope, and never mutated by the core. Identifier
/// fields are optional because the upstream view can surface NULL keys;
/// consumers classify such rows as [`AnalyticsError::InvalidRowData`], skip
/// them and count them, never failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub transaction_id: Option<TransactionId>,
    pub site_id: Option<SiteId>,
    pub item_id: Option<ItemId>,
    pub item_name: String,
    pub category: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub gross_amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl TransactionRow {
    /// Transaction and item keys, or `InvalidRowData` when either is missing.
    pub fn keys(&self) -> AnalyticsResult<(&TransactionId, ItemId)> {
        let tx = self
            .transaction_id
            .as_ref()
            .ok_or_else(|| AnalyticsError::invalid_row("row is missing transaction_id"))?;
        let item = self
            .item_id
            .ok_or_else(|| AnalyticsError::invalid_row("row is missing item_id"))?;
        Ok((tx, item))
    }

    /// Item key alone, for per-item aggregations that do not group by receipt.
    pub fn item_key(&self) -> AnalyticsResult<ItemId> {
        self.item_id
            .ok_or_else(|| AnalyticsError::invalid_row("row is missing item_id"))
    }

    /// Transaction key alone, for per-day/receipt aggregations.
    pub fn transaction_key(&self) -> AnalyticsResult<&TransactionId> {
        self.transaction_id
            .as_ref()
            .ok_or_else(|| AnalyticsError::invalid_row("row is missing transaction_id"))
    }

    /// Calendar day of the sale.
    pub fn sale_date(&self) -> chrono::NaiveDate {
        self.timestamp.date_naive()
    }
}
