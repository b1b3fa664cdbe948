use brickscout::cli::commands::{Cli, Commands};
use brickscout::config::Config;
use brickscout::infrastructure::sqlite::import::SeedBundle;
use brickscout::BrickScout;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brickscout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let scout = match BrickScout::new(config) {
        Ok(scout) => scout,
        Err(e) => {
            eprintln!("Error initializing BrickScout: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(scout, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(scout: BrickScout, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Analyze { product_id, strategy } => {
            let rec = scout.analyze_product(&product_id, strategy.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&rec)?);
        }
        Commands::Batch { product_ids, strategy } => {
            let batch = scout.analyze_products(&product_ids, strategy.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        Commands::Strategies => {
            let weights = scout.engine().strategy_weights();
            let listing: Vec<serde_json::Value> = scout
                .available_strategies()
                .into_iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "description": s.description,
                        "weights": weights.get(&s.name),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Commands::Analyzers => {
            println!("{}", serde_json::to_string_pretty(&scout.analyzer_info())?);
        }
        Commands::RefreshQueue => {
            println!("{}", serde_json::to_string_pretty(&scout.pending_refreshes()?)?);
        }
        Commands::Import { file } => {
            let bundle = SeedBundle::from_file(&file)?;
            let summary = scout.import(&bundle)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
