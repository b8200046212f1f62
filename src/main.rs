//! BasketForge: Market Basket Analysis CLI using the Apriori algorithm
//!
//! This is the main entrypoint that orchestrates transaction loading, frequent
//! itemset mining, rule derivation, and chart generation.

use anyhow::Result;
use basketforge::{
    derive_rules, item_frequencies, load_transactions, mine_frequent_itemsets,
    sample_transactions, viz, Args,
};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("BasketForge - Market Basket Analysis with Apriori");
        println!("=================================================\n");
    }

    run_pipeline(&args)
}

/// Run the full mining pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    println!("=== Market Basket Analysis ===\n");

    let start_time = Instant::now();

    // Step 1: Load transactions
    if args.verbose {
        println!("Step 1: Loading transactions");
        println!("  Source: {}", args.data_source());
    }

    let data_start = Instant::now();
    let transactions = match &args.input {
        Some(path) => load_transactions(path)?,
        None => sample_transactions(),
    };
    let data_time = data_start.elapsed();

    println!("✓ Loaded {} transactions", transactions.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", data_time.as_secs_f64());
        for (idx, basket) in transactions.iter().enumerate() {
            println!("  [{}] {}", idx + 1, basket.join(", "));
        }
    }

    // Step 2: Mine frequent itemsets
    if args.verbose {
        println!("\nStep 2: Mining frequent itemsets");
        println!("  Minimum support: {}", args.min_support);
    }

    let mine_start = Instant::now();
    let frequent = mine_frequent_itemsets(&transactions, args.min_support)?;
    let mine_time = mine_start.elapsed();

    println!(
        "✓ Found {} frequent itemsets (largest size: {})",
        frequent.len(),
        frequent.max_size()
    );
    if args.verbose {
        println!("  Mining time: {:.2}s", mine_time.as_secs_f64());
    }

    // Step 3: Derive association rules
    if args.verbose {
        println!("\nStep 3: Deriving association rules");
        println!("  Minimum confidence: {}", args.min_confidence);
    }

    let rules_start = Instant::now();
    let rules = derive_rules(&frequent, args.min_confidence)?;
    let rules_time = rules_start.elapsed();

    println!("✓ Derived {} association rules", rules.len());
    if args.verbose {
        println!("  Derivation time: {:.2}s", rules_time.as_secs_f64());
    }

    // Step 4: Render charts and print tables
    if args.verbose {
        println!("\nStep 4: Generating visualizations");
        println!("  Output file: {}", args.output);
    }

    let viz_start = Instant::now();
    let frequencies = item_frequencies(&transactions);
    viz::generate_visualization_report(&frequencies, &frequent, &rules, &args.output)?;
    let viz_time = viz_start.elapsed();

    if args.verbose {
        println!("\n  Visualization time: {:.2}s", viz_time.as_secs_f64());
    }

    let total_time = start_time.elapsed();
    println!("\n=== Analysis Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Item frequency chart saved to: {}", args.output);
    if !rules.is_empty() {
        println!(
            "Scatter plot saved to: {}",
            args.output.replace(".png", "_scatter.png")
        );
        println!(
            "Network graph saved to: {}",
            args.output.replace(".png", "_graph.png")
        );
    }

    Ok(())
}
