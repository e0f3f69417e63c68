//! Models command - prints the installed model listing.

use crate::config::Config;
use crate::runner::Runner;
use anyhow::Result;

/// List installed models, one identifier per line
pub async fn execute() -> Result<()> {
    let config = Config::load().await?;
    let runner = Runner::new(config.runner_bin());

    let models = runner.list_models().await?;
    if models.is_empty() {
        eprintln!("No models found.");
        return Ok(());
    }

    for model in models {
        println!("{}", model);
    }

    Ok(())
}
