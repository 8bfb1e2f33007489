//! Revenue leaders.

use marketlens_core::{AnalyticsError, AnalyticsResult, TransactionRow};
use marketlens_metrics::{ItemMovement, item_movement};

/// Default ranking cutoff for `top_items`.
pub const DEFAULT_TOP_ITEMS_LIMIT: usize = 10;

/// Items ranked by total sales descending, item id ascending on ties,
/// truncated to `limit`. Velocity ranks by quantity; this ranks by revenue.
pub fn top_items(rows: &[TransactionRow], limit: usize) -> AnalyticsResult<Vec<ItemMovement>> {
    if limit == 0 {
        return Err(AnalyticsError::invalid_limit("limit must be positive"));
    }
    let mut movement = item_movement(rows);
    movement.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    movement.truncate(limit);
    Ok(movement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::{ItemId, TransactionId};

    fn row(item: i64, qty: f64, amount: f64) -> TransactionRow {
        TransactionRow {
            transaction_id: Some(TransactionId::new("T-1")),
            site_id: None,
            item_id: Some(ItemId::new(item)),
            item_name: format!("item-{item}"),
            category: None,
            quantity: qty,
            unit_price: 0.0,
            gross_amount: amount,
            timestamp: "2024-03-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn ranks_by_revenue_not_quantity() {
        let rows = vec![row(1, 10.0, 5.0), row(2, 1.0, 50.0)];
        let top = top_items(&rows, 10).unwrap();
        assert_eq!(top[0].item_id, ItemId::new(2));
        assert_eq!(top[1].item_id, ItemId::new(1));
    }

    #[test]
    fn equal_revenue_breaks_ties_by_item_id() {
        let rows = vec![row(7, 1.0, 5.0), row(3, 1.0, 5.0)];
        let top = top_items(&rows, 10).unwrap();
        assert_eq!(top[0].item_id, ItemId::new(3));
    }

    #[test]
    fn zero_limit_is_invalid() {
        assert!(matches!(
            top_items(&[], 0).unwrap_err(),
            AnalyticsError::InvalidLimit(_)
        ));
    }
}
