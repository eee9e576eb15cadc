//! `swcheck`: PBA software checker.
//!
//! Looks up a unit by serial number and shows its installed versions, top
//! model, and whether each version is still approved.
//!
//! Usage:
//!   swcheck [-c <context-or-path>] [-o table|json] check <SERIAL> [--today YYYY-MM-DD]
//!   swcheck decode <SERIAL>
//!   swcheck approved <MODEL>

mod commands;
mod render;

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use swcheck_core::{CheckError, CheckerConfig};

/// PBA software checker.
#[derive(Parser, Debug)]
#[command(name = "swcheck", about = "PBA software version checker")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", global = true, default_value = "./swcheck.toml")]
    config: String,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the installed versions of a unit.
    Check {
        /// Unit serial number.
        serial: String,
        /// Evaluate expiration as of this date instead of today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show the PBA code embedded in a serial number.
    Decode {
        /// Unit serial number.
        serial: String,
    },

    /// List the approved versions of a model.
    Approved {
        /// Top model name.
        model: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            let code = e
                .downcast_ref::<CheckError>()
                .map_or(1, CheckError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Operator-facing text for a failed command.
fn failure_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<CheckError>() {
        Some(check) if check.is_not_found() => "Serial number not found".to_string(),
        _ => format!("Error: {:#}", e),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let load_config = || -> anyhow::Result<CheckerConfig> {
        let path = CheckerConfig::resolve_path(&cli.config);
        tracing::debug!("loading configuration from {}", path.display());
        Ok(CheckerConfig::load(&path)?)
    };

    match &cli.command {
        Commands::Check { serial, today } => {
            commands::check::run(&load_config()?, serial, *today, cli.output)
        }
        Commands::Decode { serial } => commands::decode::run(serial, cli.output),
        Commands::Approved { model } => {
            commands::approved::run(&load_config()?, model, cli.output)
        }
    }
}
