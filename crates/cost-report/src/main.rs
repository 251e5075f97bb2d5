//! Delay Cost Report CLI
//!
//! Usage:
//!   delay-cost-report --request flight.json --output report.json
//!   delay-cost-report --batch fleet.json --delays 0,15,30,60,120

use anyhow::Result;
use clap::Parser;
use cost_report::{build_batch_report, build_report, loader, DEFAULT_DELAYS};
use delay_cost_engine::{CostEngine, EngineConfig};
use reference_data::{load_tables, ReferenceTables};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "delay-cost-report",
    about = "Tabulate the cost of delay for one flight or a batch of flights"
)]
struct Args {
    /// Path to a single flight request JSON file
    #[arg(short, long, conflicts_with = "batch", required_unless_present = "batch")]
    request: Option<PathBuf>,

    /// Path to a batch JSON file: {"flights": {"<label>": request}}
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Output JSON file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated delays in minutes
    #[arg(short, long, value_delimiter = ',')]
    delays: Vec<f64>,

    /// Reference tables JSON file (built-in tables when omitted)
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn write_output<T: Serialize>(output: Option<&PathBuf>, value: &T) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing output to {:?}", path);
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, value)?;
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reference = match &args.reference {
        Some(path) => load_tables(path)?,
        None => ReferenceTables::builtin(),
    };
    let config = match &args.config {
        Some(path) => loader::load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    let engine = CostEngine::new(reference).with_config(config);

    let delays = if args.delays.is_empty() {
        DEFAULT_DELAYS.to_vec()
    } else {
        args.delays.clone()
    };

    if let Some(path) = &args.batch {
        let batch = loader::load_batch(path)?;
        let report = build_batch_report(&engine, &batch, &delays)?;

        for row in &report.rows {
            info!("  {:24} | {:?}", row.label, row.costs);
        }
        for (label, reason) in &report.failures {
            info!("  {:24} | FAILED: {}", label, reason);
        }
        write_output(args.output.as_ref(), &report)?;
    } else if let Some(path) = &args.request {
        let request = loader::load_request(path)?;
        let report = build_report(&engine, &request, &delays)?;

        for row in &report.rows {
            info!("  {:>6} min | {:>12.2}", row.delay, row.total);
        }
        write_output(args.output.as_ref(), &report)?;
    }

    Ok(())
}
