//! Oracle prefetch replay CLI.
//!
//! This binary exercises the oracle prefetch engine outside a full simulator. It performs:
//! 1. **Replay:** Feeds a live access log through an engine built from a prediction log and reports coverage.
//! 2. **Inspect:** Parses a prediction log and prints what the engine would load from it.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oracle_prefetch::config::{ConfigOverrides, OracleConfig, RequestorId};
use oracle_prefetch::prefetch::{OraclePrefetcher, PredictionTrace};
use oracle_prefetch::sim::{SimClock, TraceReplay};

#[derive(Parser, Debug)]
#[command(
    name = "oracle-replay",
    author,
    version,
    about = "Trace-driven oracle prefetcher replay",
    long_about = "Replay a recorded access log through the oracle prefetch engine.\n\nLogging is controlled with RUST_LOG (default: warn).\n\nExamples:\n  oracle-replay run -p l2_trace.txt\n  oracle-replay run -p run1.txt --live run2.txt --distance 64\n  oracle-replay inspect l2_trace.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a live access log against a prediction log.
    Run {
        /// Prediction log used as the oracle (overrides the config file).
        #[arg(short, long)]
        predictions: Option<PathBuf>,

        /// Live access log; defaults to the prediction log itself.
        #[arg(short, long)]
        live: Option<PathBuf>,

        /// JSON engine configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Lookahead distance in trace entries.
        #[arg(short, long)]
        distance: Option<usize>,

        /// Block size in bytes.
        #[arg(short, long)]
        block_size: Option<usize>,

        /// Requester identity stamped on requests.
        #[arg(short, long)]
        requestor: Option<u16>,
    },

    /// Parse a prediction log and print its summary.
    Inspect {
        /// Prediction log path.
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            predictions,
            live,
            config,
            distance,
            block_size,
            requestor,
        } => {
            let config = config
                .map_or_else(OracleConfig::default, |path| {
                    OracleConfig::from_file(&path).unwrap_or_else(|e| fatal(&e))
                })
                .with_overrides(ConfigOverrides {
                    prediction_file: predictions,
                    distance,
                    block_size,
                    requestor_id: requestor.map(RequestorId),
                });
            cmd_run(&config, live);
        }
        Commands::Inspect { path } => cmd_inspect(&path),
    }
}

/// Builds the engine, replays the live log, and prints the report and stats.
fn cmd_run(config: &OracleConfig, live: Option<PathBuf>) {
    if config.prediction_file.as_os_str().is_empty() {
        eprintln!("Error: specify --predictions <file> or a config with prediction_file");
        eprintln!("  oracle-replay run -p l2_trace.txt");
        process::exit(1);
    }

    let clock = SimClock::new();
    let mut engine =
        OraclePrefetcher::from_config(config, clock.clone()).unwrap_or_else(|e| fatal(&e));

    let live_path = live.unwrap_or_else(|| config.prediction_file.clone());
    let accesses = PredictionTrace::load(&live_path).unwrap_or_else(|e| fatal(&e));

    println!(
        "Configuration: distance={} block_size={} requestor={}",
        config.distance, config.block_size, config.requestor_id.0
    );
    println!("  predictions: {}", config.prediction_file.display());
    println!("  live:        {}", live_path.display());

    let report = TraceReplay::new(clock, config.block_size).run(&mut engine, &accesses);
    report.print();
    engine.stats().print();
}

/// Loads a prediction log and prints its line counts and tick range.
fn cmd_inspect(path: &Path) {
    let trace = PredictionTrace::load(path).unwrap_or_else(|e| fatal(&e));
    let summary = trace.summary();
    let misses = trace.iter().filter(|entry| entry.is_miss).count();

    println!("trace                    {}", path.display());
    println!("trace.lines              {}", summary.lines);
    println!("trace.predictions        {}", summary.accepted);
    println!("trace.misses             {misses}");
    println!("trace.filtered           {}", summary.filtered);
    println!("trace.rejected           {}", summary.rejected);
    if let (Some(first), Some(last)) = (trace.entries().first(), trace.entries().last()) {
        println!(
            "trace.ticks              {}..={}",
            first.recorded_tick, last.recorded_tick
        );
    }
}

/// Prints a fatal error and exits.
fn fatal(err: &dyn std::error::Error) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}
