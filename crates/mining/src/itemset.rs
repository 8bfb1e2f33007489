//! Canonical itemset representation.

use serde::{Deserialize, Serialize};

use marketlens_core::ItemId;

/// A non-empty set of distinct item ids, canonically stored as a sorted
/// vector. The derived `Ord` is the canonical itemset order used for every
/// deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    /// Build from any item collection; sorts and deduplicates.
    pub fn new(mut items: Vec<ItemId>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn single(item: ItemId) -> Self {
        Self(vec![item])
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subset test against a sorted item slice (two-pointer merge scan).
    pub fn is_subset_of(&self, sorted: &[ItemId]) -> bool {
        let mut pos = 0;
        for needle in &self.0 {
            while pos < sorted.len() && sorted[pos] < *needle {
                pos += 1;
            }
            if pos == sorted.len() || sorted[pos] != *needle {
                return false;
            }
            pos += 1;
        }
        true
    }

    /// Apriori join: two k-sets sharing a (k-1)-prefix combine into a
    /// (k+1)-set. `None` when the prefixes differ; callers iterating a sorted
    /// frontier can stop probing on the first mismatch.
    pub fn join(&self, other: &Itemset) -> Option<Itemset> {
        let k = self.0.len();
        if k == 0 || other.0.len() != k || self.0[..k - 1] != other.0[..k - 1] {
            return None;
        }
        debug_assert!(self.0[k - 1] < other.0[k - 1]);
        let mut joined = self.0.clone();
        joined.push(other.0[k - 1]);
        Some(Itemset(joined))
    }

    /// All subsets obtained by removing exactly one element, in canonical
    /// order. Used for the prune step.
    pub fn subsets_without_one(&self) -> impl Iterator<Item = Itemset> + '_ {
        (0..self.0.len()).map(move |skip| {
            let items = self
                .0
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, item)| *item)
                .collect();
            Itemset(items)
        })
    }

    /// Split into (antecedent, consequent) by membership bitmask over the
    /// canonical order. Bit i set puts element i into the antecedent.
    pub fn split(&self, mask: usize) -> (Itemset, Itemset) {
        let mut antecedent = Vec::new();
        let mut consequent = Vec::new();
        for (i, item) in self.0.iter().enumerate() {
            if mask & (1 << i) != 0 {
                antecedent.push(*item);
            } else {
                consequent.push(*item);
            }
        }
        (Itemset(antecedent), Itemset(consequent))
    }
}

/// A frequent itemset with its basket support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsetSupport {
    pub items: Itemset,
    /// Number of baskets containing the itemset as a subset.
    pub count: u64,
    /// `count` / total basket count, in [0, 1].
    pub support: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[i64]) -> Itemset {
        Itemset::new(items.iter().copied().map(ItemId::new).collect())
    }

    #[test]
    fn new_sorts_and_dedups() {
        assert_eq!(set(&[3, 1, 2, 1]), set(&[1, 2, 3]));
    }

    #[test]
    fn subset_scan() {
        let sorted: Vec<ItemId> = [1, 3, 5, 9].iter().copied().map(ItemId::new).collect();
        assert!(set(&[3, 9]).is_subset_of(&sorted));
        assert!(set(&[1, 3, 5, 9]).is_subset_of(&sorted));
        assert!(!set(&[3, 4]).is_subset_of(&sorted));
        assert!(!set(&[10]).is_subset_of(&sorted));
    }

    #[test]
    fn join_requires_shared_prefix() {
        assert_eq!(set(&[1, 2]).join(&set(&[1, 3])), Some(set(&[1, 2, 3])));
        assert_eq!(set(&[1, 2]).join(&set(&[2, 3])), None);
        assert_eq!(set(&[1]).join(&set(&[4])), Some(set(&[1, 4])));
    }

    #[test]
    fn subsets_without_one_of_triple() {
        let subs: Vec<Itemset> = set(&[1, 2, 3]).subsets_without_one().collect();
        assert_eq!(subs, vec![set(&[2, 3]), set(&[1, 3]), set(&[1, 2])]);
    }

    #[test]
    fn split_partitions_by_mask() {
        let (ant, cons) = set(&[1, 2, 3]).split(0b101);
        assert_eq!(ant, set(&[1, 3]));
        assert_eq!(cons, set(&[2]));
    }

    #[test]
    fn canonical_order_is_lexicographic() {
        assert!(set(&[1]) < set(&[1, 2]));
        assert!(set(&[1, 2]) < set(&[2]));
    }
}
