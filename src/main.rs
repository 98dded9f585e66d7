//! u-board CLI entry point.
//!
//! Lays out one table read from JSON and prints the board view as JSON.

use std::{fs, process, str::FromStr};

use clap::Parser;
use log::{debug, error, info, LevelFilter};
use serde::Deserialize;

use u_board::board::BoardView;
use u_board::config::load_config;
use u_board::models::{Building, Table};
use u_board::BoardError;

/// Command-line arguments for the board layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input JSON file (`{"table": ..., "buildings": [...]}`)
    #[arg(help = "Path to the input file")]
    input: String,

    /// Path to the output JSON file (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Input document.
#[derive(Debug, Deserialize)]
struct BoardInput {
    table: Table,
    #[serde(default)]
    buildings: Vec<Building>,
}

fn run(args: &Args) -> Result<(), BoardError> {
    info!(input_path = args.input; "Processing table");

    let config = load_config(args.config.as_ref())?;
    let content = fs::read_to_string(&args.input)?;
    let input: BoardInput = serde_json::from_str(&content)?;

    let view = BoardView::build(&input.table, &input.buildings, &config)?;
    let json = serde_json::to_string_pretty(&view)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file = path; "Board view written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    if let Err(err) = run(&args) {
        error!("{err}");
        process::exit(1);
    }
}
