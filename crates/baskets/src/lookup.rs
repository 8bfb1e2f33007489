//! Single-transaction line lookup.

use serde::{Deserialize, Serialize};

use marketlens_core::{ItemId, TransactionId, TransactionRow};

/// One line of a receipt, as returned by [`transaction_lookup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLine {
    pub item_id: ItemId,
    pub item_name: String,
    pub category: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub gross_amount: f64,
}

/// All line items belonging to one transaction, sorted by item id.
///
/// Rows without an item id are ignored; an unknown transaction id yields an
/// empty list, not an error.
pub fn transaction_lookup(rows: &[TransactionRow], transaction_id: &TransactionId) -> Vec<TransactionLine> {
    let mut lines: Vec<TransactionLine> = rows
        .iter()
        .filter(|row| row.transaction_id.as_ref() == Some(transaction_id))
        .filter_map(|row| {
            let item_id = row.item_id?;
            Some(TransactionLine {
                item_id,
                item_name: row.item_name.clone(),
                category: row.category.clone(),
                quantity: row.quantity,
                unit_price: row.unit_price,
                gross_amount: row.gross_amount,
            })
        })
        .collect();
    lines.sort_by(|a, b| a.item_id.cmp(&b.item_id));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::SiteId;

    fn row(tx: &str, item: i64) -> TransactionRow {
        TransactionRow {
            transaction_id: Some(TransactionId::new(tx)),
            site_id: Some(SiteId::new(1)),
            item_id: Some(ItemId::new(item)),
            item_name: format!("item-{item}"),
            category: None,
            quantity: 1.0,
            unit_price: 2.0,
            gross_amount: 2.0,
            timestamp: "2024-03-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn returns_lines_of_requested_transaction_only() {
        let rows = vec![row("T-1", 30), row("T-2", 10), row("T-1", 20)];
        let lines = transaction_lookup(&rows, &TransactionId::new("T-1"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_id, ItemId::new(20));
        assert_eq!(lines[1].item_id, ItemId::new(30));
    }

    #[test]
    fn unknown_transaction_yields_empty_list() {
        let rows = vec![row("T-1", 30)];
        assert!(transaction_lookup(&rows, &TransactionId::new("T-9")).is_empty());
    }
}
