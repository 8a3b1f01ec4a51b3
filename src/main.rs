//! Hybrid Analyzer - multi-timeframe SMC analysis from the command line
//!
//! # Usage
//! ```sh
//! hybrid-analyzer --data-dir data BTC ETH/USDT
//! hybrid-analyzer --json --history 5 SOL
//! ```
//!
//! Configuration comes from the environment (and `.env`); see `Config::from_env`.

use anyhow::Result;
use clap::Parser;
use hybrid_analyzer::application::analysis::{AnalysisService, SignalComposer};
use hybrid_analyzer::config::Config;
use hybrid_analyzer::infrastructure::{CsvMarketDataProvider, InMemoryAnalysisRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-timeframe SMC trade analysis", long_about = None)]
struct Args {
    /// Directory holding <COIN>_<tf>.csv candle files (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print full results as JSON instead of the narrative
    #[arg(long)]
    json: bool,

    /// Also print the N most recent stored analyses
    #[arg(long)]
    history: Option<usize>,

    /// Symbols to analyze, e.g. BTC or ETH/USDT
    #[arg(required = true)]
    symbols: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so --json output stays parseable
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir.clone());

    info!(
        "Hybrid Analyzer {} | data: {} | governing: {} | trigger: {}",
        env!("CARGO_PKG_VERSION"),
        data_dir.display(),
        config.analysis.governing_timeframe,
        config.analysis.trigger_timeframe
    );

    let service = AnalysisService::new(
        Arc::new(CsvMarketDataProvider::new(data_dir)),
        Arc::new(InMemoryAnalysisRepository::new()),
        Arc::new(SignalComposer::new(config.analysis.clone(), config.risk.clone())),
    )
    .with_persist_all(config.persist_all_analyses);

    let batch = service.analyze_symbols(&args.symbols).await?;

    let mut failures = 0;
    for entry in &batch {
        match &entry.result {
            Ok(result) if args.json => println!("{}", serde_json::to_string_pretty(result)?),
            Ok(result) => {
                println!("=== {} @ {:.4} ===", result.symbol, result.current_price);
                println!("{}", result.recommendation);
                println!("{}", result.narrative);
                println!();
            }
            Err(e) => {
                failures += 1;
                warn!("{}: {}", entry.symbol, e);
            }
        }
    }

    if let Some(limit) = args.history {
        let records = service.history(limit).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            println!("=== Last {} stored analyses ===", records.len());
            for record in &records {
                println!(
                    "{} | {} | {} | {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S"),
                    record.coin_name,
                    record.recommendation,
                    record.id
                );
            }
        }
    }

    if failures == batch.len() {
        anyhow::bail!("No symbol could be analyzed");
    }

    Ok(())
}
