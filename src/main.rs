//! Outpost CLI - play the game in a terminal or check configuration files.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Outpost - a robot-deployment resource game
#[derive(Parser, Debug)]
#[command(name = "outpost")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Grid resource document (built-in default if missing or invalid)
        #[arg(long, default_value = "assets/grid-resources.json")]
        grid_config: PathBuf,

        /// Terminal layout document
        #[arg(long, default_value = "assets/layout.json")]
        layout: PathBuf,

        /// Game rules document (built-in rules if omitted)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write logs to this file (the terminal is taken by the game)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Check a grid resource document and show each cell's odds
    Validate {
        /// Grid resource document
        #[arg(required = true)]
        path: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ValidateFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            grid_config,
            layout,
            rules,
            seed,
            log_file,
        } => cli::logging::init(cli::logging::LogSink::for_tui(log_file.as_deref()))
            .and_then(|()| cli::play::execute(grid_config, layout, rules, seed)),

        Commands::Validate { path, format } => cli::logging::init(cli::logging::LogSink::Stderr)
            .and_then(|()| cli::validate::execute(&path, format)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
