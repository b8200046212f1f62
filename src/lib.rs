//! BasketForge: A Rust CLI application for market basket analysis using the Apriori algorithm
//!
//! This library mines frequent itemsets and association rules from shopping-cart
//! transactions, annotating each rule with support, confidence, and lift.

pub mod cli;
pub mod data;
pub mod miner;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{item_frequencies, load_transactions, sample_transactions};
pub use miner::{
    derive_rules, mine_frequent_itemsets, AssociationRule, FrequentItemsets, Itemset, MinerError,
};
pub use viz::generate_visualization_report;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
