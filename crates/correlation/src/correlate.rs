//! Target-conditioned co-occurrence counting and ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_baskets::Basket;
use marketlens_core::{AnalyticsError, AnalyticsResult, ItemId};

/// Parameters for `item_correlation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Minimum absolute co-occurrence count for an entry to qualify.
    pub min_frequency: u64,
    /// Maximum number of ranked entries returned.
    pub top_n: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_frequency: 5,
            top_n: 20,
        }
    }
}

/// Parameters for `cross_sell_opportunities`: the same ranking without a
/// co-occurrence floor, truncated harder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSellConfig {
    pub top_n: usize,
}

impl Default for CrossSellConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// One ranked cross-sell partner of the target item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub item_id: ItemId,
    /// Count of baskets containing both the target and this item.
    pub frequency: u64,
    /// frequency / target item's basket count.
    pub confidence: f64,
    /// confidence / this item's overall support ratio; `None` when that
    /// support is zero.
    pub lift: Option<f64>,
}

/// Items frequently bought together with `target`.
///
/// Scans only baskets containing the target; a target absent from every
/// basket yields an empty list, not an error. Order: frequency descending,
/// lift descending, item id ascending.
pub fn item_correlation(
    target: ItemId,
    baskets: &[Basket],
    config: &CorrelationConfig,
) -> AnalyticsResult<Vec<CorrelationEntry>> {
    if config.top_n == 0 {
        return Err(AnalyticsError::invalid_limit("top_n must be positive"));
    }
    Ok(rank(target, baskets, config.min_frequency, config.top_n))
}

/// Complementary items for bundle suggestions: every co-occurring item
/// qualifies, ranked and truncated to `top_n`.
pub fn cross_sell_opportunities(
    target: ItemId,
    baskets: &[Basket],
    config: &CrossSellConfig,
) -> AnalyticsResult<Vec<CorrelationEntry>> {
    if config.top_n == 0 {
        return Err(AnalyticsError::invalid_limit("top_n must be positive"));
    }
    Ok(rank(target, baskets, 1, config.top_n))
}

fn rank(target: ItemId, baskets: &[Basket], min_frequency: u64, top_n: usize) -> Vec<CorrelationEntry> {
    let total = baskets.len() as f64;

    // Overall per-item basket counts, for the lift denominator.
    let mut overall: BTreeMap<ItemId, u64> = BTreeMap::new();
    let mut target_count = 0u64;
    for basket in baskets {
        for &item in &basket.items {
            *overall.entry(item).or_insert(0) += 1;
        }
        if basket.contains(target) {
            target_count += 1;
        }
    }
    if target_count == 0 {
        return Vec::new();
    }

    // Co-occurrence tally over target baskets only.
    let mut co_counts: BTreeMap<ItemId, u64> = BTreeMap::new();
    for basket in baskets.iter().filter(|b| b.contains(target)) {
        for &item in &basket.items {
            if item != target {
                *co_counts.entry(item).or_insert(0) += 1;
            }
        }
    }

    let mut entries: Vec<CorrelationEntry> = co_counts
        .into_iter()
        .filter(|(_, frequency)| *frequency >= min_frequency)
        .map(|(item_id, frequency)| {
            let confidence = frequency as f64 / target_count as f64;
            let item_support = overall.get(&item_id).copied().unwrap_or(0) as f64 / total;
            let lift = if item_support > 0.0 {
                Some(confidence / item_support)
            } else {
                None
            };
            CorrelationEntry {
                item_id,
                frequency,
                confidence,
                lift,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| {
                b.lift
                    .unwrap_or(0.0)
                    .total_cmp(&a.lift.unwrap_or(0.0))
            })
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    entries.truncate(top_n);
    debug!(%target, entries = entries.len(), "correlation ranking complete");
    entries
}
