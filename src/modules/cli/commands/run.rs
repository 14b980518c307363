//! Run command implementation

use clap::Args;
use hbnb_core::{HbnbError, Settings};
use hbnb_runtime::Runtime;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Override bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl RunCommand {
    /// Execute the run command
    pub async fn execute(&self, settings: Settings) -> Result<(), HbnbError> {
        let runtime = self.runtime(settings).await?;
        runtime.run().await
    }

    /// Open storage and apply the command-line overrides
    pub async fn runtime(&self, settings: Settings) -> Result<Runtime, HbnbError> {
        Ok(Runtime::new(settings)
            .await?
            .with_overrides(self.host.clone(), self.port))
    }
}
