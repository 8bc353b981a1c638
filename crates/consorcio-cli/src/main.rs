mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::compare::CompareArgs;
use commands::consortium::ConsortiumArgs;
use commands::financing::FinancingArgs;
use commands::limits::LimitsArgs;

/// Consórcio vs. financiamento cost comparison
#[derive(Parser)]
#[command(
    name = "consorcio",
    version,
    about = "Compare consórcio and financiamento for a car or property",
    long_about = "Projects the monthly instalment and total cost of buying a car or property \
                  through a consórcio (pooled purchase, administrative fee, no interest) or a \
                  financiamento (Price-system loan), and shows which one is cheaper. \
                  All arithmetic uses 128-bit decimals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the cost of a consórcio plan
    Consortium(ConsortiumArgs),
    /// Project the cost of a Price-system loan
    Financing(FinancingArgs),
    /// Validate both modalities, price them and compare
    Compare(CompareArgs),
    /// Show limits and labels for an asset type
    Limits(LimitsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Report,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Consortium(args) => commands::consortium::run_consortium(args),
        Commands::Financing(args) => commands::financing::run_financing(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Limits(args) => commands::limits::run_limits(args),
        Commands::Version => {
            println!("consorcio {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            log_warnings(&cli.output, &value);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Table and report output print warnings inline; the others would drop them.
fn log_warnings(format: &OutputFormat, value: &Value) {
    let Some(Value::Array(warnings)) = value.get("warnings") else {
        return;
    };
    debug!(count = warnings.len(), "computation finished");
    if matches!(format, OutputFormat::Table | OutputFormat::Report) {
        return;
    }
    for w in warnings.iter().filter_map(Value::as_str) {
        warn!("{w}");
    }
}
