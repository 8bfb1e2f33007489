//! Basket construction from raw transaction rows.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::{ItemId, SiteId, TransactionId, TransactionRow};

/// The distinct set of items purchased in one transaction.
///
/// Quantities are collapsed into `items` membership; `total_quantity` and
/// `total_amount` keep the receipt-level sums. Always non-empty: groups that
/// end up with zero distinct items are dropped before mining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub transaction_id: TransactionId,
    pub site_id: Option<SiteId>,
    pub items: BTreeSet<ItemId>,
    pub total_quantity: f64,
    pub total_amount: f64,
}

impl Basket {
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in canonical ascending order.
    pub fn items_sorted(&self) -> Vec<ItemId> {
        self.items.iter().copied().collect()
    }
}

/// Result of a basket build: the baskets plus the count of rows that were
/// skipped because they lacked a transaction or item identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketBuild {
    pub baskets: Vec<Basket>,
    pub skipped_rows: u64,
}

/// Group rows by transaction id into baskets.
///
/// Pure transform. Rows with a missing identifier are skipped and counted;
/// rows with non-positive quantity are discarded (returns/voids carry no
/// basket membership). Grouping goes through a `BTreeMap`, so basket order is
/// by transaction id regardless of input row order.
pub fn build_baskets(rows: &[TransactionRow]) -> BasketBuild {
    struct Group {
        site_id: Option<SiteId>,
        items: BTreeSet<ItemId>,
        total_quantity: f64,
        total_amount: f64,
    }

    let mut groups: BTreeMap<TransactionId, Group> = BTreeMap::new();
    let mut skipped_rows = 0u64;

    for row in rows {
        let (tx, item) = match row.keys() {
            Ok(keys) => keys,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };

        if row.quantity <= 0.0 {
            continue;
        }

        let group = groups.entry(tx.clone()).or_insert_with(|| Group {
            site_id: row.site_id,
            items: BTreeSet::new(),
            total_quantity: 0.0,
            total_amount: 0.0,
        });
        group.items.insert(item);
        group.total_quantity += row.quantity;
        group.total_amount += row.gross_amount;
        if group.site_id.is_none() {
            group.site_id = row.site_id;
        }
    }

    let baskets: Vec<Basket> = groups
        .into_iter()
        .filter(|(_, group)| !group.items.is_empty())
        .map(|(transaction_id, group)| Basket {
            transaction_id,
            site_id: group.site_id,
            items: group.items,
            total_quantity: group.total_quantity,
            total_amount: group.total_amount,
        })
        .collect();

    if skipped_rows > 0 {
        debug!(skipped_rows, "skipped rows with missing identifiers");
    }

    BasketBuild {
        baskets,
        skipped_rows,
    }
}
