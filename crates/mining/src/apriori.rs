//! Level-wise (Apriori) mining of frequent itemsets and association rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_baskets::Basket;
use marketlens_core::{AnalyticsError, AnalyticsResult, ItemId};

use crate::itemset::{Itemset, ItemsetSupport};

/// Parameters for `basket_analysis`. Validated up front, before any basket
/// scan, so invalid parameters never cost a pass over the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Minimum support ratio in (0, 1].
    pub min_support: f64,
    /// Minimum rule confidence in (0, 1].
    pub min_confidence: f64,
    /// Itemset size cap (>= 2); bounds the candidate combinatorics together
    /// with per-level support pruning.
    pub max_items: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_confidence: 0.5,
            max_items: 3,
        }
    }
}

impl MiningConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.min_support.is_finite() && self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(AnalyticsError::threshold(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        if !(self.min_confidence.is_finite()
            && self.min_confidence > 0.0
            && self.min_confidence <= 1.0)
        {
            return Err(AnalyticsError::threshold(format!(
                "min_confidence must be in (0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.max_items < 2 {
            return Err(AnalyticsError::InvalidItemsetSize(self.max_items));
        }
        Ok(())
    }
}

/// One mined association rule, flat and ready for tabular serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support ratio of antecedent ∪ consequent.
    pub support: f64,
    /// support(antecedent ∪ consequent) / support(antecedent).
    pub confidence: f64,
    /// confidence / support(consequent); `None` when the denominator support
    /// is zero rather than a computed garbage value.
    pub lift: Option<f64>,
}

/// All frequent itemsets at or above `min_support`, ordered by support count
/// descending then canonical itemset ascending.
pub fn frequent_itemsets(
    baskets: &[Basket],
    config: &MiningConfig,
) -> AnalyticsResult<Vec<ItemsetSupport>> {
    config.validate()?;
    let index = mine_index(baskets, config);
    let total = baskets.len() as f64;

    let mut records: Vec<ItemsetSupport> = index
        .into_iter()
        .map(|(items, count)| ItemsetSupport {
            items,
            count,
            support: count as f64 / total,
        })
        .collect();
    records.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.items.cmp(&b.items)));
    Ok(records)
}

/// Mine association rules from the frequent itemsets.
///
/// Every frequent itemset of size >= 2 is split into all non-trivial
/// antecedent/consequent pairs; a rule is emitted when its confidence clears
/// `min_confidence`. Output order: confidence descending, support descending,
/// antecedent ascending, consequent ascending.
pub fn basket_analysis(
    baskets: &[Basket],
    config: &MiningConfig,
) -> AnalyticsResult<Vec<RuleRecord>> {
    config.validate()?;
    if baskets.is_empty() {
        return Ok(Vec::new());
    }

    let index = mine_index(baskets, config);
    let total = baskets.len() as f64;
    let mut rules: Vec<RuleRecord> = Vec::new();

    for (itemset, &count) in &index {
        let n = itemset.len();
        if n < 2 || n >= usize::BITS as usize {
            continue;
        }
        let full = (1usize << n) - 1;
        for mask in 1..full {
            let (antecedent, consequent) = itemset.split(mask);
            // Both sides are subsets of a frequent itemset, so monotonicity
            // guarantees they are in the index.
            let Some(&antecedent_count) = index.get(&antecedent) else {
                continue;
            };
            let Some(&consequent_count) = index.get(&consequent) else {
                continue;
            };
            let confidence = count as f64 / antecedent_count as f64;
            if confidence < config.min_confidence {
                continue;
            }
            let consequent_support = consequent_count as f64 / total;
            let lift = if consequent_support > 0.0 {
                Some(confidence / consequent_support)
            } else {
                None
            };
            rules.push(RuleRecord {
                antecedent,
                consequent,
                support: count as f64 / total,
                confidence,
                lift,
            });
        }
    }

    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.support.total_cmp(&a.support))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    debug!(rules = rules.len(), baskets = baskets.len(), "basket analysis complete");
    Ok(rules)
}

/// Level-wise support index: canonical itemset -> basket count.
fn mine_index(baskets: &[Basket], config: &MiningConfig) -> BTreeMap<Itemset, u64> {
    let mut index: BTreeMap<Itemset, u64> = BTreeMap::new();
    if baskets.is_empty() {
        return index;
    }
    let total = baskets.len() as f64;
    let basket_items: Vec<Vec<ItemId>> = baskets.iter().map(Basket::items_sorted).collect();

    // Level 1: single-item supports.
    let mut singles: BTreeMap<ItemId, u64> = BTreeMap::new();
    for items in &basket_items {
        for &item in items {
            *singles.entry(item).or_insert(0) += 1;
        }
    }
    let mut frontier: Vec<Itemset> = Vec::new();
    for (item, count) in singles {
        if count as f64 / total >= config.min_support {
            let single = Itemset::single(item);
            index.insert(single.clone(), count);
            frontier.push(single);
        }
    }
    debug!(level = 1, frequent = frontier.len(), "apriori level complete");

    // Level k: join surviving (k-1)-itemsets sharing a (k-2)-prefix, prune
    // candidates with any infrequent subset, then count by basket scan.
    for level in 2..=config.max_items {
        if frontier.is_empty() {
            break;
        }
        let previous: BTreeSet<&Itemset> = frontier.iter().collect();
        let mut next: Vec<Itemset> = Vec::new();

        for i in 0..frontier.len() {
            for j in (i + 1)..frontier.len() {
                // The frontier is sorted, so the joinable partners of
                // frontier[i] form a contiguous block right after it.
                let Some(candidate) = frontier[i].join(&frontier[j]) else {
                    break;
                };
                if !candidate
                    .subsets_without_one()
                    .all(|subset| previous.contains(&subset))
                {
                    continue;
                }
                let count = basket_items
                    .iter()
                    .filter(|items| candidate.is_subset_of(items))
                    .count() as u64;
                if count as f64 / total >= config.min_support {
                    index.insert(candidate.clone(), count);
                    next.push(candidate);
                }
            }
        }
        debug!(level, frequent = next.len(), "apriori level complete");
        frontier = next;
    }

    index
}
