//! Prompt command - runs a single prompt without TUI.

use crate::config::Config;
use crate::runner::Runner;
use anyhow::Result;

/// Execute a single prompt round-trip and print the response
pub async fn execute(prompt: &str, model: Option<&str>) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt is empty");
    }

    let config = Config::load().await?;
    let runner = Runner::new(config.runner_bin()).with_timeout(config.timeout());

    let model = resolve_model(&runner, model, &config).await?;
    tracing::debug!(%model, "running one-shot prompt");

    let output = runner.generate(&model, prompt.trim()).await?;
    let response = output.trim();

    if response.is_empty() {
        eprintln!("Model did not return any output.");
    } else {
        println!("{}", response);
    }

    Ok(())
}

/// Resolve the model: CLI arg > config > first installed model
async fn resolve_model(runner: &Runner, model: Option<&str>, config: &Config) -> Result<String> {
    if let Some(m) = model {
        return Ok(m.to_string());
    }
    if let Some(m) = &config.model {
        return Ok(m.clone());
    }

    let models = runner.list_models().await?;
    models
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No models found. Please install models and try again."))
}
