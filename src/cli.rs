//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Market basket analysis CLI using the Apriori algorithm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a CSV file with TransactionID,Item columns
    /// (omit to run on the built-in sample baskets)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Minimum support threshold, in (0, 1]
    #[arg(short = 's', long, default_value_t = 0.4)]
    pub min_support: f64,

    /// Minimum confidence threshold, in (0, 1]
    #[arg(short = 'c', long, default_value_t = 0.5)]
    pub min_confidence: f64,

    /// Output path for the item frequency chart; scatter and graph charts
    /// are written alongside it
    #[arg(short, long, default_value = "basket_plot.png")]
    pub output: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Human-readable label for where transactions come from
    pub fn data_source(&self) -> &str {
        self.input.as_deref().unwrap_or("built-in sample baskets")
    }
}
