use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "brickscout",
    about = "Collectible set scoring and buy-price recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend one product
    Analyze {
        /// Product ID
        product_id: String,
        /// Strategy name (default: BRICKSCOUT_STRATEGY or "Investment Focus")
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Recommend several products with one fetch per data source
    Batch {
        /// Product IDs
        #[arg(required = true)]
        product_ids: Vec<String>,
        #[arg(long)]
        strategy: Option<String>,
    },
    /// List available strategies and their dimension weights
    Strategies,
    /// List dimension analyzers
    Analyzers,
    /// Show catalog numbers waiting for a price guide refresh
    RefreshQueue,
    /// Load a JSON seed bundle (products, market_records, sales_statistics, sentiment, retirement)
    Import {
        /// Path to the JSON file
        file: String,
    },
}
