//! Basket-level KPIs and item movement rankings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_baskets::Basket;
use marketlens_core::{AnalyticsError, AnalyticsResult, ItemId, TransactionRow};

/// Default ranking cutoff for `product_velocity`.
pub const DEFAULT_VELOCITY_LIMIT: usize = 10;

/// Default quantity cutoff for `low_movement`.
pub const DEFAULT_LOW_MOVEMENT_THRESHOLD: f64 = 10.0;

/// Aggregate KPIs over the baskets in range. A single flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketMetrics {
    pub transaction_count: u64,
    pub total_quantity: f64,
    pub total_sales: f64,
    /// Sum of distinct-item basket sizes / basket count; 0 for zero baskets.
    pub avg_items_per_basket: f64,
}

/// Per-item movement totals within the caller's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMovement {
    pub item_id: ItemId,
    pub item_name: String,
    pub total_quantity: f64,
    pub total_sales: f64,
}

/// Overall basket KPIs for a date range.
pub fn basket_metrics(baskets: &[Basket]) -> BasketMetrics {
    let transaction_count = baskets.len() as u64;
    let total_quantity: f64 = baskets.iter().map(|b| b.total_quantity).sum();
    let total_sales: f64 = baskets.iter().map(|b| b.total_amount).sum();
    let avg_items_per_basket = if baskets.is_empty() {
        0.0
    } else {
        baskets.iter().map(|b| b.len() as f64).sum::<f64>() / baskets.len() as f64
    };
    BasketMetrics {
        transaction_count,
        total_quantity,
        total_sales,
        avg_items_per_basket,
    }
}

/// Per-item quantity/sales totals, keyed and ordered by item id.
///
/// Rows missing an item id are skipped and counted, never fatal. The display
/// name is the first non-empty one observed for the id.
pub fn item_movement(rows: &[TransactionRow]) -> Vec<ItemMovement> {
    let mut totals: BTreeMap<ItemId, ItemMovement> = BTreeMap::new();
    let mut skipped_rows = 0u64;

    for row in rows {
        let item_id = match row.item_key() {
            Ok(id) => id,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        let entry = totals.entry(item_id).or_insert_with(|| ItemMovement {
            item_id,
            item_name: String::new(),
            total_quantity: 0.0,
            total_sales: 0.0,
        });
        entry.total_quantity += row.quantity;
        entry.total_sales += row.gross_amount;
        if entry.item_name.is_empty() {
            entry.item_name = row.item_name.clone();
        }
    }

    if skipped_rows > 0 {
        debug!(skipped_rows, "skipped rows with missing item id");
    }
    totals.into_values().collect()
}

/// Fastest movers: items ranked by total quantity descending, item id
/// ascending on ties, truncated to `limit`.
pub fn product_velocity(rows: &[TransactionRow], limit: usize) -> AnalyticsResult<Vec<ItemMovement>> {
    if limit == 0 {
        return Err(AnalyticsError::invalid_limit("limit must be positive"));
    }
    let mut movement = item_movement(rows);
    movement.sort_by(|a, b| {
        b.total_quantity
            .total_cmp(&a.total_quantity)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    movement.truncate(limit);
    Ok(movement)
}

/// Slow movers: items whose total quantity is strictly below `threshold`,
/// quantity ascending, item id ascending on ties.
pub fn low_movement(rows: &[TransactionRow], threshold: f64) -> Vec<ItemMovement> {
    let mut movement: Vec<ItemMovement> = item_movement(rows)
        .into_iter()
        .filter(|m| m.total_quantity < threshold)
        .collect();
    movement.sort_by(|a, b| {
        a.total_quantity
            .total_cmp(&b.total_quantity)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    movement
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::{SiteId, TransactionId};
    use std::collections::BTreeSet;

    fn basket(tx: &str, items: &[i64], quantity: f64, amount: f64) -> Basket {
        Basket {
            transaction_id: TransactionId::new(tx),
            site_id: None,
            items: items.iter().copied().map(ItemId::new).collect::<BTreeSet<_>>(),
            total_quantity: quantity,
            total_amount: amount,
        }
    }

    fn row(tx: &str, item: i64, name: &str, qty: f64, amount: f64) -> TransactionRow {
        TransactionRow {
            transaction_id: Some(TransactionId::new(tx)),
            site_id: Some(SiteId::new(1)),
            item_id: Some(ItemId::new(item)),
            item_name: name.to_string(),
            category: None,
            quantity: qty,
            unit_price: 0.0,
            gross_amount: amount,
            timestamp: "2024-03-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn avg_items_per_basket_over_sizes_one_two_three() {
        let baskets = vec![
            basket("T-1", &[1], 1.0, 2.0),
            basket("T-2", &[1, 2], 2.0, 4.0),
            basket("T-3", &[1, 2, 3], 3.0, 6.0),
        ];
        let metrics = basket_metrics(&baskets);
        assert_eq!(metrics.transaction_count, 3);
        assert_eq!(metrics.total_quantity, 6.0);
        assert_eq!(metrics.total_sales, 12.0);
        assert_eq!(metrics.avg_items_per_basket, 2.0);
    }

    #[test]
    fn zero_baskets_average_is_zero_not_a_division_error() {
        let metrics = basket_metrics(&[]);
        assert_eq!(metrics.transaction_count, 0);
        assert_eq!(metrics.avg_items_per_basket, 0.0);
    }

    #[test]
    fn velocity_ranks_by_quantity_then_item_id() {
        let rows = vec![
            row("T-1", 2, "b", 5.0, 10.0),
            row("T-2", 1, "a", 5.0, 8.0),
            row("T-3", 3, "c", 9.0, 9.0),
        ];
        let top = product_velocity(&rows, 10).unwrap();
        let ids: Vec<ItemId> = top.iter().map(|m| m.item_id).collect();
        assert_eq!(ids, vec![ItemId::new(3), ItemId::new(1), ItemId::new(2)]);
    }

    #[test]
    fn velocity_truncates_to_limit_and_rejects_zero() {
        let rows = vec![row("T-1", 1, "a", 1.0, 1.0), row("T-2", 2, "b", 2.0, 2.0)];
        assert_eq!(product_velocity(&rows, 1).unwrap().len(), 1);
        assert!(matches!(
            product_velocity(&rows, 0).unwrap_err(),
            AnalyticsError::InvalidLimit(_)
        ));
    }

    #[test]
    fn low_movement_cutoff_is_strict() {
        let rows = vec![
            row("T-1", 1, "a", 10.0, 1.0),
            row("T-2", 2, "b", 9.0, 1.0),
            row("T-3", 3, "c", 2.0, 1.0),
        ];
        let slow = low_movement(&rows, 10.0);
        let ids: Vec<ItemId> = slow.iter().map(|m| m.item_id).collect();
        // Exactly at threshold does not qualify; ascending by quantity.
        assert_eq!(ids, vec![ItemId::new(3), ItemId::new(2)]);
    }

    #[test]
    fn movement_accumulates_across_transactions() {
        let rows = vec![
            row("T-1", 1, "espresso", 2.0, 5.0),
            row("T-2", 1, "espresso", 3.0, 7.5),
        ];
        let movement = item_movement(&rows);
        assert_eq!(movement.len(), 1);
        assert_eq!(movement[0].total_quantity, 5.0);
        assert_eq!(movement[0].total_sales, 12.5);
        assert_eq!(movement[0].item_name, "espresso");
    }

    #[test]
    fn rows_missing_item_id_are_skipped() {
        let mut bad = row("T-1", 1, "a", 1.0, 1.0);
        bad.item_id = None;
        let rows = vec![bad, row("T-2", 2, "b", 2.0, 2.0)];
        assert_eq!(item_movement(&rows).len(), 1);
    }

    #[test]
    fn basket_metrics_serializes_as_single_flat_record() {
        let value = serde_json::to_value(basket_metrics(&[])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "transaction_count": 0,
                "total_quantity": 0.0,
                "total_sales": 0.0,
                "avg_items_per_basket": 0.0,
            })
        );
    }
}
