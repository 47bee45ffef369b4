//! ks-search: search a Keepsake catalog from the command line.
//!
//! Catalogs are JSON arrays of searchable records exported by the app.

use clap::{Parser, Subcommand};
use keepsake_cli::output::Status;
use keepsake_core::{config::Config, error::exit_codes};
use keepsake_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

const VERBOSE_FILTER: &str = "ks_search=debug,keepsake_core=debug,keepsake_search=debug";

/// Universal search over a Keepsake catalog
#[derive(Parser)]
#[command(name = "ks-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Configuration file (defaults to .keepsake.toml if present)
    #[arg(short, long, global = true, env = "KEEPSAKE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog records against a query
    Query {
        /// Catalog file (JSON array of records)
        catalog: PathBuf,

        /// Query, e.g. @movie rating>4 "dark knight" -batman
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        query: Vec<String>,

        /// Maximum results to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show how a query is parsed
    Parse {
        /// Query to parse
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Fuzzy search catalog titles
    Fuzzy {
        /// Text to match against titles
        query: String,

        /// Catalog file (JSON array of records)
        catalog: PathBuf,

        /// Drop scores at or below this (defaults to the configured threshold)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Maximum results to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(&anyhow::Error::from(e), &cli.format),
    };

    let level = if cli.verbose {
        VERBOSE_FILTER.to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let telemetry = TelemetryConfig::default()
        .with_level(level)
        .with_target(config.schema.logging.show_target);
    if let Err(e) = keepsake_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    let result = match cli.command {
        Commands::Query { catalog, query, limit } => {
            commands::query::run(&catalog, &query.join(" "), limit, &config, &cli.format)
        }
        Commands::Parse { query } => commands::parse::run(&query.join(" "), &config, &cli.format),
        Commands::Fuzzy { query, catalog, threshold, limit } => {
            commands::fuzzy::run(&catalog, &query, threshold, limit, &config, &cli.format)
        }
    };

    match result {
        Ok(()) => exit_code(exit_codes::SUCCESS),
        Err(e) => fail(&e, &cli.format),
    }
}

/// Report a failed command and pick its exit code.
///
/// With `--format json`, coded errors are also printed to stdout as an
/// error report.
fn fail(err: &anyhow::Error, format: &str) -> ExitCode {
    let coded = err.downcast_ref::<keepsake_core::Error>();

    if format == "json" {
        if let Some(report) = coded.map(keepsake_core::Error::to_report) {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => Status::warning(&format!("Could not serialize error report: {}", e)),
            }
        }
    }

    eprintln!("{} {}", "Error:".red().bold(), err);
    exit_code(coded.map_or(exit_codes::FAILURE, keepsake_core::Error::exit_code))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
