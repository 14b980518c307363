//! CLI commands

mod run;
mod stats;

pub use run::RunCommand;
pub use stats::StatsCommand;

use clap::{Parser, Subcommand};
use tracing::Level;

/// HBnB - REST API for places, cities and amenities
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path; missing files fall back to defaults
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `hbnb run -f hbnb.yaml`.
    #[arg(short = 'f', long = "file", global = true, default_value = "hbnb.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Run(RunCommand),

    /// Print the number of stored objects per collection
    Stats(StatsCommand),
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration file path
    pub fn config_path(&self) -> &str {
        &self.config
    }

    /// Tracing level from `--verbose`, else from the configured level (0-3)
    pub fn log_level(&self, configured: u8) -> Level {
        if self.verbose {
            return Level::DEBUG;
        }
        match configured {
            0 => Level::DEBUG,
            1 => Level::INFO,
            2 => Level::WARN,
            _ => Level::ERROR,
        }
    }
}
