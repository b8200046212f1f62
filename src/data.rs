//! Transaction loading and item frequency counting using Polars

use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;

/// The built-in demo dataset: five small shopping baskets
pub fn sample_transactions() -> Vec<Vec<String>> {
    [
        vec!["milk", "bread", "eggs"],
        vec!["bread", "butter"],
        vec!["milk", "bread"],
        vec!["butter", "eggs"],
        vec!["milk", "eggs"],
    ]
    .into_iter()
    .map(|basket| basket.into_iter().map(String::from).collect())
    .collect()
}

/// Load transactions from a CSV file with `TransactionID` and `Item` columns
///
/// Rows are grouped into baskets by transaction id, preserving the order in
/// which each id first appears. Duplicate items within a basket are collapsed.
///
/// # Arguments
/// * `file_path` - Path to the CSV file
///
/// # Returns
/// * One item list per transaction
pub fn load_transactions(file_path: &str) -> crate::Result<Vec<Vec<String>>> {
    // Load data using a Polars lazy frame, dropping incomplete rows
    let df = LazyCsvReader::new(file_path)
        .finish()?
        .filter(
            col("TransactionID")
                .is_not_null()
                .and(col("Item").is_not_null()),
        )
        .collect()?;

    if df.height() == 0 {
        anyhow::bail!("No valid transaction rows found in {}", file_path);
    }

    let tx_ids = df.column("TransactionID")?.cast(&DataType::Utf8)?;
    let tx_ids = tx_ids.utf8()?;
    let items = df.column("Item")?.utf8()?;

    let mut order: Vec<String> = Vec::new();
    let mut baskets: HashMap<String, BTreeSet<String>> = HashMap::new();

    for (tx_id, item) in tx_ids.into_iter().zip(items.into_iter()) {
        let (Some(tx_id), Some(item)) = (tx_id, item) else {
            continue;
        };
        let basket = baskets.entry(tx_id.to_string()).or_insert_with(|| {
            order.push(tx_id.to_string());
            BTreeSet::new()
        });
        basket.insert(item.trim().to_string());
    }

    let transactions: Vec<Vec<String>> = order
        .iter()
        .filter_map(|tx_id| baskets.remove(tx_id))
        .map(|basket| basket.into_iter().collect())
        .collect();

    if transactions.is_empty() {
        anyhow::bail!("No transactions found after grouping {}", file_path);
    }

    Ok(transactions)
}

/// Count how many transactions each item appears in, for the frequency chart
///
/// Returned in descending count order, ties broken alphabetically.
pub fn item_frequencies(transactions: &[Vec<String>]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for basket in transactions {
        let distinct: BTreeSet<&str> = basket.iter().map(String::as_str).collect();
        for item in distinct {
            *counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(item, count)| (item.to_string(), count))
        .collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies
}
