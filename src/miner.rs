//! Apriori frequent-itemset mining and association-rule derivation
//!
//! The miner is a pure function of its inputs: transactions plus two thresholds
//! in, frequent itemsets and rules out. Supports are kept at full precision
//! internally; rounding to two decimals happens only when results are rendered.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use thiserror::Error;

/// Errors surfaced before any mining work begins
#[derive(Debug, Error, PartialEq)]
pub enum MinerError {
    /// A threshold fell outside the valid (0, 1] range
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// No transactions were supplied, or every transaction was empty
    #[error("transaction list is empty or contains only empty transactions")]
    EmptyInput,
}

/// A set of distinct items together with the fraction of transactions containing all of them
#[derive(Debug, Clone, PartialEq)]
pub struct Itemset {
    /// Item identifiers, kept sorted for deterministic output
    pub items: BTreeSet<String>,
    /// Fraction of transactions containing every item, in [0, 1], full precision
    pub support: f64,
}

impl Itemset {
    /// Items joined for table and chart labels
    pub fn label(&self) -> String {
        self.items.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Two-decimal rounding is a display concern only
        write!(f, "{{{}}}: {:.2}", self.label(), self.support)
    }
}

/// A directional rule between two disjoint itemsets drawn from one frequent itemset
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    /// The "if" side of the rule
    pub antecedent: BTreeSet<String>,
    /// The "then" side of the rule
    pub consequent: BTreeSet<String>,
    /// Support of antecedent ∪ consequent
    pub support: f64,
    /// support(union) / support(antecedent)
    pub confidence: f64,
    /// confidence / support(consequent); above 1 means positive association
    pub lift: f64,
}

impl fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs = self.antecedent.iter().cloned().collect::<Vec<_>>().join(", ");
        let rhs = self.consequent.iter().cloned().collect::<Vec<_>>().join(", ");
        write!(
            f,
            "{{{}}} -> {{{}}} (support {:.2}, confidence {:.2}, lift {:.2})",
            lhs, rhs, self.support, self.confidence, self.lift
        )
    }
}

/// All frequent itemsets found by one mining invocation
///
/// Owns a support index covering every retained itemset. By anti-monotonicity
/// each subset of a frequent itemset is itself frequent, so rule derivation can
/// look up antecedent and consequent supports without rescanning transactions.
#[derive(Debug)]
pub struct FrequentItemsets {
    itemsets: Vec<Itemset>,
    support_index: HashMap<BTreeSet<String>, f64>,
}

impl FrequentItemsets {
    /// Frequent itemsets sorted by size, then lexicographically
    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    /// Full-precision support of a retained itemset, if it was frequent
    pub fn support_of(&self, items: &BTreeSet<String>) -> Option<f64> {
        self.support_index.get(items).copied()
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    /// Size of the largest frequent itemset found (0 when empty)
    pub fn max_size(&self) -> usize {
        self.itemsets.iter().map(|s| s.items.len()).max().unwrap_or(0)
    }
}

fn validate_threshold(name: &'static str, value: f64) -> Result<(), MinerError> {
    // NaN fails the first comparison and is rejected too
    if !(value > 0.0 && value <= 1.0) {
        return Err(MinerError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Mine all frequent itemsets from `transactions` at the given support threshold
///
/// Level-wise Apriori: size-1 itemsets first, then each level k extends the
/// frequent (k-1)-itemsets with frequent single items, pruning any candidate
/// with an infrequent (k-1)-subset before transactions are scanned. Duplicate
/// items within a transaction count once.
///
/// An empty result is a valid outcome when no single item reaches the
/// threshold; it is not an error.
pub fn mine_frequent_itemsets(
    transactions: &[Vec<String>],
    min_support: f64,
) -> Result<FrequentItemsets, MinerError> {
    validate_threshold("min_support", min_support)?;

    let baskets: Vec<HashSet<&str>> = transactions
        .iter()
        .map(|t| t.iter().map(String::as_str).collect())
        .collect();

    if baskets.iter().all(HashSet::is_empty) {
        return Err(MinerError::EmptyInput);
    }

    let total = baskets.len() as f64;
    let mut itemsets = Vec::new();
    let mut support_index = HashMap::new();

    // Level 1: single-item supports
    let mut item_counts: HashMap<&str, usize> = HashMap::new();
    for basket in &baskets {
        for item in basket {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut frequent_items: Vec<String> = Vec::new();
    for (item, count) in &item_counts {
        let support = *count as f64 / total;
        if support >= min_support {
            let set: BTreeSet<String> = BTreeSet::from([item.to_string()]);
            support_index.insert(set.clone(), support);
            itemsets.push(Itemset {
                items: set,
                support,
            });
            frequent_items.push(item.to_string());
        }
    }
    frequent_items.sort();

    // Levels 2..: extend, prune, count
    let mut current: Vec<BTreeSet<String>> =
        itemsets.iter().map(|s| s.items.clone()).collect();
    while !current.is_empty() {
        let known: HashSet<&BTreeSet<String>> = current.iter().collect();
        let mut next = Vec::new();

        for seed in &current {
            // Extending only past the seed's largest item generates each
            // candidate exactly once
            let last = match seed.iter().next_back() {
                Some(item) => item.clone(),
                None => continue,
            };
            for item in frequent_items.iter().filter(|i| **i > last) {
                let mut candidate = seed.clone();
                candidate.insert(item.clone());

                // Apriori pruning: every (k-1)-subset must already be frequent
                let prunable = candidate.iter().any(|drop| {
                    let mut subset = candidate.clone();
                    subset.remove(drop);
                    !known.contains(&subset)
                });
                if prunable {
                    continue;
                }

                let count = baskets
                    .iter()
                    .filter(|b| candidate.iter().all(|i| b.contains(i.as_str())))
                    .count();
                let support = count as f64 / total;
                if support >= min_support {
                    support_index.insert(candidate.clone(), support);
                    itemsets.push(Itemset {
                        items: candidate.clone(),
                        support,
                    });
                    next.push(candidate);
                }
            }
        }

        current = next;
    }

    itemsets.sort_by(|a, b| {
        a.items
            .len()
            .cmp(&b.items.len())
            .then_with(|| a.items.cmp(&b.items))
    });

    Ok(FrequentItemsets {
        itemsets,
        support_index,
    })
}

/// Derive association rules from frequent itemsets at the given confidence threshold
///
/// Every frequent itemset of size >= 2 is split into each non-empty proper
/// subset (antecedent) and its complement (consequent). A rule is retained when
/// its full-precision confidence reaches the threshold. An empty rule set is a
/// valid outcome, never an error.
pub fn derive_rules(
    frequent: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>, MinerError> {
    validate_threshold("min_confidence", min_confidence)?;

    let mut rules = Vec::new();

    for itemset in frequent.itemsets() {
        let size = itemset.items.len();
        if size < 2 {
            continue;
        }

        let members: Vec<&String> = itemset.items.iter().collect();
        // Bitmask enumeration of non-empty proper subsets
        for mask in 1..(1u64 << size) - 1 {
            let mut antecedent = BTreeSet::new();
            let mut consequent = BTreeSet::new();
            for (bit, item) in members.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    antecedent.insert((*item).clone());
                } else {
                    consequent.insert((*item).clone());
                }
            }

            // Both subsets of a frequent itemset are frequent by
            // anti-monotonicity, so the lookups cannot miss
            let (Some(antecedent_support), Some(consequent_support)) = (
                frequent.support_of(&antecedent),
                frequent.support_of(&consequent),
            ) else {
                continue;
            };

            let confidence = itemset.support / antecedent_support;
            if confidence >= min_confidence {
                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support: itemset.support,
                    confidence,
                    lift: confidence / consequent_support,
                });
            }
        }
    }

    rules.sort_by(|a, b| {
        a.antecedent
            .cmp(&b.antecedent)
            .then_with(|| a.consequent.cmp(&b.consequent))
    });

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_transactions;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sample_frequent_itemsets() {
        let transactions = sample_transactions();
        let frequent = mine_frequent_itemsets(&transactions, 0.4).unwrap();

        // All four single items reach 0.4
        assert_eq!(frequent.support_of(&set(&["milk"])), Some(0.6));
        assert_eq!(frequent.support_of(&set(&["bread"])), Some(0.6));
        assert_eq!(frequent.support_of(&set(&["eggs"])), Some(0.6));
        assert_eq!(frequent.support_of(&set(&["butter"])), Some(0.4));

        // {milk, bread} and {milk, eggs} each appear in 2 of 5 baskets
        assert_eq!(frequent.support_of(&set(&["milk", "bread"])), Some(0.4));
        assert_eq!(frequent.support_of(&set(&["milk", "eggs"])), Some(0.4));
        assert_eq!(frequent.support_of(&set(&["bread", "eggs"])), None);
        assert_eq!(frequent.support_of(&set(&["butter", "eggs"])), None);
        let pairs: Vec<_> = frequent
            .itemsets()
            .iter()
            .filter(|s| s.items.len() == 2)
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(frequent.max_size(), 2);
        assert_eq!(frequent.len(), 6);
    }

    #[test]
    fn test_sample_rules() {
        let transactions = sample_transactions();
        let frequent = mine_frequent_itemsets(&transactions, 0.4).unwrap();
        let rules = derive_rules(&frequent, 0.5).unwrap();

        // Both frequent pairs split into rules in each direction, all at
        // confidence 0.4/0.6
        assert_eq!(rules.len(), 4);
        for rule in &rules {
            assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-12);
            assert!((rule.support - 0.4).abs() < 1e-12);
            assert!((rule.lift - (2.0 / 3.0) / 0.6).abs() < 1e-12);
        }
        assert!(rules
            .iter()
            .any(|r| r.antecedent == set(&["milk"]) && r.consequent == set(&["bread"])));
        assert!(rules
            .iter()
            .any(|r| r.antecedent == set(&["bread"]) && r.consequent == set(&["milk"])));
        assert!(rules
            .iter()
            .any(|r| r.antecedent == set(&["eggs"]) && r.consequent == set(&["milk"])));
        assert!(rules
            .iter()
            .any(|r| r.antecedent == set(&["milk"]) && r.consequent == set(&["eggs"])));
    }

    #[test]
    fn test_full_support_threshold_yields_empty_result() {
        let transactions = sample_transactions();
        let frequent = mine_frequent_itemsets(&transactions, 1.0).unwrap();
        assert!(frequent.is_empty());

        let rules = derive_rules(&frequent, 0.5).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            mine_frequent_itemsets(&[], 0.4).unwrap_err(),
            MinerError::EmptyInput
        );
        let all_empty: Vec<Vec<String>> = vec![vec![], vec![]];
        assert_eq!(
            mine_frequent_itemsets(&all_empty, 0.4).unwrap_err(),
            MinerError::EmptyInput
        );
    }

    #[test]
    fn test_invalid_thresholds() {
        let transactions = sample_transactions();
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let result = mine_frequent_itemsets(&transactions, bad);
            assert!(matches!(
                result,
                Err(MinerError::InvalidParameter { name: "min_support", .. })
            ));
        }

        let frequent = mine_frequent_itemsets(&transactions, 0.4).unwrap();
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let result = derive_rules(&frequent, bad);
            assert!(matches!(
                result,
                Err(MinerError::InvalidParameter { name: "min_confidence", .. })
            ));
        }
    }

    #[test]
    fn test_anti_monotonicity() {
        let transactions = sample_transactions();
        let frequent = mine_frequent_itemsets(&transactions, 0.1).unwrap();

        // Every subset of a frequent itemset is frequent with support at least as high
        for itemset in frequent.itemsets() {
            let members: Vec<&String> = itemset.items.iter().collect();
            for drop in &members {
                let mut subset: BTreeSet<String> = itemset.items.clone();
                subset.remove(*drop);
                if subset.is_empty() {
                    continue;
                }
                let subset_support = frequent.support_of(&subset).unwrap();
                assert!(subset_support >= itemset.support);
            }
        }
    }

    #[test]
    fn test_threshold_invariants() {
        let transactions = sample_transactions();
        let min_support = 0.3;
        let min_confidence = 0.5;

        let frequent = mine_frequent_itemsets(&transactions, min_support).unwrap();
        for itemset in frequent.itemsets() {
            assert!(itemset.support >= min_support);
        }

        let rules = derive_rules(&frequent, min_confidence).unwrap();
        for rule in &rules {
            assert!(rule.confidence >= min_confidence);
            let union: BTreeSet<String> =
                rule.antecedent.union(&rule.consequent).cloned().collect();
            let union_support = frequent.support_of(&union).unwrap();
            let antecedent_support = frequent.support_of(&rule.antecedent).unwrap();
            assert_eq!(rule.confidence, union_support / antecedent_support);
            assert!(rule.antecedent.is_disjoint(&rule.consequent));
        }
    }

    #[test]
    fn test_idempotence() {
        let transactions = sample_transactions();
        let first = mine_frequent_itemsets(&transactions, 0.4).unwrap();
        let second = mine_frequent_itemsets(&transactions, 0.4).unwrap();
        assert_eq!(first.itemsets(), second.itemsets());

        let rules_first = derive_rules(&first, 0.5).unwrap();
        let rules_second = derive_rules(&second, 0.5).unwrap();
        assert_eq!(rules_first, rules_second);
    }

    #[test]
    fn test_duplicate_items_count_once() {
        let transactions = vec![
            vec!["milk".to_string(), "milk".to_string(), "bread".to_string()],
            vec!["milk".to_string()],
        ];
        let frequent = mine_frequent_itemsets(&transactions, 0.5).unwrap();
        assert_eq!(frequent.support_of(&set(&["milk"])), Some(1.0));
        assert_eq!(frequent.support_of(&set(&["bread"])), Some(0.5));
    }

    #[test]
    fn test_three_itemset_rules() {
        // {a, b, c} in 2 of 3 baskets produces rules with multi-item sides
        let transactions = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["a".to_string(), "d".to_string()],
        ];
        let frequent = mine_frequent_itemsets(&transactions, 0.5).unwrap();
        assert!(frequent.support_of(&set(&["a", "b", "c"])).is_some());

        let rules = derive_rules(&frequent, 0.9).unwrap();
        // b -> a, c -> a, {b,c} -> a, etc. all hold with confidence 1.0
        assert!(rules
            .iter()
            .any(|r| r.antecedent == set(&["b", "c"]) && r.consequent == set(&["a"])));
        let rule = rules
            .iter()
            .find(|r| r.antecedent == set(&["b"]) && r.consequent == set(&["a", "c"]))
            .unwrap();
        assert_eq!(rule.confidence, 1.0);
    }

    #[test]
    fn test_display_rounding() {
        let transactions = sample_transactions();
        let frequent = mine_frequent_itemsets(&transactions, 0.4).unwrap();
        let rules = derive_rules(&frequent, 0.5).unwrap();

        let rendered = rules[0].to_string();
        assert!(rendered.contains("confidence 0.67"));
        assert!(rendered.contains("support 0.40"));
    }
}
