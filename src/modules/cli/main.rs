//! HBnB CLI
//!
//! Command-line interface for the HBnB API server.

use clap::Parser;
use hbnb_cli::{Cli, Commands, Logging};
use hbnb_core::HbnbError;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HbnbError> {
    let cli = Cli::parse();
    let config_path = cli.config_path().to_string();

    // Initialize logging before loading so the loader's events are kept
    let logging = Logging::init(cli.log_level(1));

    let settings = hbnb_parser::load(&config_path)?;

    let level = cli.log_level(settings.log_level());
    if let Err(e) = logging.set_level(level) {
        warn!("{}", e);
    }
    debug!(
        "Configuration: {} ({} storage, log level {})",
        config_path, settings.storage.storage_type, level
    );

    // Execute command
    match cli.command {
        Commands::Run(cmd) => {
            cmd.execute(settings).await?;
        }
        Commands::Stats(cmd) => {
            cmd.execute(settings).await?;
        }
    }

    Ok(())
}
