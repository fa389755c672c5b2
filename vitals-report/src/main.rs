// Vitals Report - Web Vitals from a host storage snapshot
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! # Vitals Report
//!
//! Prints the assessment, value, bar position and field densities of each
//! Web Vital for the active tab of a host storage snapshot.
//!
//! ## Usage
//!
//! ```bash
//! # Text report
//! vitals-report --snapshot snapshot.json
//!
//! # JSON with one decimal place on densities
//! vitals-report --snapshot snapshot.json --format json --decimal-places 1
//! ```

mod report;
mod snapshot;

use clap::Parser;
use report::{render, OutputFormat};
use snapshot::Snapshot;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Web Vitals report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Decimal places of field densities
    #[arg(short, long, default_value = "0")]
    decimal_places: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Vitals Report v{}", env!("CARGO_PKG_VERSION"));

    let snapshot = match Snapshot::from_file(&args.snapshot) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to load snapshot: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&snapshot, args.format, args.decimal_places) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
