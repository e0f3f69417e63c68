//! Config management CLI commands.

use crate::config::Config;
use anyhow::Result;

/// Show current configuration
pub async fn show() -> Result<()> {
    let config = Config::load().await?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Show configuration file path
pub async fn path() -> Result<()> {
    if let Some(global_path) = Config::global_config_path() {
        println!("Global config: {}", global_path.display());
    }

    if let Some(global_dir) = Config::global_config_dir() {
        println!("Config directory: {}", global_dir.display());
    }

    // Check for project config
    let cwd = std::env::current_dir()?;
    let project_config = cwd.join("ollamachat.json");

    if project_config.exists() {
        println!("Project config: {}", project_config.display());
    } else {
        println!("No project config found in {}", cwd.display());
    }

    Ok(())
}

/// Initialize configuration file with defaults
pub async fn init() -> Result<()> {
    let config_path = Config::init().await?;
    println!(
        "Created default configuration file at: {}",
        config_path.display()
    );
    println!("\nExample configuration:");
    println!(
        r#"
{{
  "theme": "dark",
  "model": "llama3:latest",
  "runner_bin": "ollama",
  "timeout_secs": 120,
  "transcript_path": "chat_log.txt"
}}
"#
    );
    Ok(())
}
