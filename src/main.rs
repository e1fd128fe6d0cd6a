use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use food_quality::config::{AppConfig, DEFAULT_CONFIG_PATH};
use food_quality::db::store::Store;
use food_quality::import;
use food_quality::monitoring::logger;
use food_quality::server::{self, AppState};
use food_quality::service::{FoodItemQualityReport, QualityService};

#[derive(Debug, Parser)]
#[command(name = "food-quality", version, about = "Pet food data-quality assessment")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// Assess the record(s) in a JSON file and print the reports.
    Assess {
        #[arg(long)]
        file: PathBuf,
    },
    /// Load the record(s) in a JSON file into the database.
    Import {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print quality statistics over the most recent stored items.
    Stats {
        #[arg(long, default_value_t = 100)]
        sample_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    logger::init_logging(&config.monitoring)?;

    tracing::info!(
        command = ?cli.command,
        database = %config.database.path,
        "Food quality service starting"
    );

    match cli.command {
        Command::Serve => run_server(config).await,
        Command::Assess { file } => run_assess(&file),
        Command::Import { file } => run_import(&config, &file).await,
        Command::Stats { sample_size } => run_stats(config, sample_size).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let store = Store::new(&config.database.path).await?;
    let service = QualityService::new(store, config.quality.clone());
    server::serve(AppState::new(service), &config.server.addr()).await
}

/// Score records straight from a file. No database involved.
fn run_assess(file: &std::path::Path) -> Result<()> {
    let records = import::read_records(file)?;
    let reports: Vec<FoodItemQualityReport> = records
        .iter()
        .map(FoodItemQualityReport::from_record)
        .collect();

    tracing::info!(count = reports.len(), "Records assessed");
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

async fn run_import(config: &AppConfig, file: &std::path::Path) -> Result<()> {
    let records = import::read_records(file)?;
    let store = Store::new(&config.database.path).await?;

    for record in &records {
        store.insert_food_item(record).await?;
    }

    let total = store.count_food_items().await?;
    tracing::info!(imported = records.len(), total, "Import complete");
    Ok(())
}

async fn run_stats(config: AppConfig, sample_size: usize) -> Result<()> {
    let store = Store::new(&config.database.path).await?;
    let service = QualityService::new(store, config.quality);
    let stats = service.quality_statistics(sample_size).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
