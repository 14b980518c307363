//! Stats command implementation

use clap::Args;
use hbnb_core::{HbnbError, Settings};
use hbnb_runtime::{counts_json, open_storage};
use serde_json::Value;

/// Stats command arguments
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

impl StatsCommand {
    /// Execute the stats command
    pub async fn execute(&self, settings: Settings) -> Result<(), HbnbError> {
        println!("{}", self.render(&Self::collect(&settings).await?)?);
        Ok(())
    }

    /// Count stored objects per collection
    pub async fn collect(settings: &Settings) -> Result<Value, HbnbError> {
        let storage = open_storage(&settings.storage).await?;
        let counts = storage.as_ref().counts().await;
        storage.close().await?;
        Ok(counts_json(&counts?))
    }

    fn render(&self, stats: &Value) -> Result<String, HbnbError> {
        let text = if self.compact {
            serde_json::to_string(stats)?
        } else {
            serde_json::to_string_pretty(stats)?
        };
        Ok(text)
    }
}
