//! swapspread CLI binary.
//!
//! Runs the treasury/swap spread pipeline stage by stage.

mod cmd;
mod data;
mod settings;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::calc::OutputFormat;
use settings::Settings;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swapspread")]
#[command(about = "Treasury/SOFR swap spread replication", long_about = None)]
#[command(version)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show settings and create the data and output directories
    Config,

    /// Pull and clean treasury and swap quotes
    Pull {
        /// Ignore cached tables and fetch again
        #[arg(long)]
        refresh: bool,
    },

    /// Compute and store the spread table
    Calc {
        /// Ignore cached pulls and fetch again
        #[arg(long)]
        refresh: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the mean spread table and replication charts
    Supplementary,

    /// Write the replicated and updated spread charts
    Plot,

    /// Run every stage in order
    All {
        /// Ignore cached pulls and fetch again
        #[arg(long)]
        refresh: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Config => {
            cmd::config::show(&settings);
            cmd::config::create_dirs(&settings)?;
        }
        Commands::Pull { refresh } => {
            cmd::config::create_dirs(&settings)?;
            cmd::pull::run(&settings, refresh)?;
        }
        Commands::Calc { refresh, format } => {
            cmd::config::create_dirs(&settings)?;
            cmd::calc::run(&settings, refresh, format)?;
        }
        Commands::Supplementary => {
            cmd::config::create_dirs(&settings)?;
            cmd::supplementary::run(&settings)?;
        }
        Commands::Plot => {
            cmd::config::create_dirs(&settings)?;
            cmd::plot::run(&settings)?;
        }
        Commands::All { refresh } => {
            cmd::config::create_dirs(&settings)?;
            cmd::pull::run(&settings, refresh)?;
            cmd::calc::run(&settings, false, OutputFormat::Text)?;
            cmd::supplementary::run(&settings)?;
            cmd::plot::run(&settings)?;
        }
    }

    Ok(())
}
