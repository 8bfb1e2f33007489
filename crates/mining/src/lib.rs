//! `marketlens-mining` — level-wise frequent-itemset search and
//! association-rule derivation over baskets (`basket_analysis`).
//!
//! Deterministic for a fixed basket set and parameters regardless of basket
//! iteration order: all intermediate state is keyed by the canonical sorted
//! itemset form, and every output order has a fixed secondary key.

pub mod apriori;
pub mod itemset;

pub use apriori::{MiningConfig, RuleRecord, basket_analysis, frequent_itemsets};
pub use itemset::{Itemset, ItemsetSupport};
