//! Configuration management module.
//!
//! This module handles loading and managing configuration from various sources:
//! - Global config file (~/.config/ollamachat/ollamachat.json)
//! - Project config file (./ollamachat.json, searched upward from cwd)
//! - Environment variable substitution inside values ({env:VAR_NAME})
//!
//! Configuration follows a layered approach where project config overrides
//! global config. Every field has a default, so the program runs without any
//! config file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default binary used for model listing and prompting
pub const DEFAULT_RUNNER_BIN: &str = "ollama";

/// Default transcript save target, relative to the working directory
pub const DEFAULT_TRANSCRIPT_PATH: &str = "chat_log.txt";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON schema reference
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Theme name ("dark" or "light")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Default model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Binary used to list and run models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_bin: Option<String>,

    /// Per-request timeout in seconds; absent means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Transcript save path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<String>,
}

impl Config {
    /// Load configuration from all sources
    pub async fn load() -> Result<Self> {
        let mut config = Config::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global_config) = Self::load_file(&global_path).await? {
                config = config.merge(global_config);
            }
        }

        // Load project config
        if let Some(project_path) = Self::find_project_config()? {
            if let Some(project_config) = Self::load_file(&project_path).await? {
                config = config.merge(project_config);
            }
        }

        tracing::debug!(?config, "configuration loaded");

        Ok(config)
    }

    /// Get the global config directory path
    pub fn global_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ollamachat"))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|p| p.join("ollamachat.json"))
    }

    /// Find project config file in current directory or parent directories
    fn find_project_config() -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            let config_path = current.join("ollamachat.json");
            if config_path.exists() {
                return Ok(Some(config_path));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Load configuration from a file
    async fn load_file(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // Handle empty or whitespace-only files
        if content.trim().is_empty() {
            return Ok(Some(Config::default()));
        }

        // Handle environment variable substitution
        let content = Self::substitute_env_vars(&content);

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(Some(config))
    }

    /// Substitute environment variables in the format {env:VAR_NAME}
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\{env:([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .to_string()
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(mut self, other: Config) -> Self {
        if other.schema.is_some() {
            self.schema = other.schema;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.runner_bin.is_some() {
            self.runner_bin = other.runner_bin;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.transcript_path.is_some() {
            self.transcript_path = other.transcript_path;
        }
        self
    }

    /// Binary used to list and run models, with default applied
    pub fn runner_bin(&self) -> &str {
        self.runner_bin.as_deref().unwrap_or(DEFAULT_RUNNER_BIN)
    }

    /// Transcript save path, with default applied
    pub fn transcript_path(&self) -> PathBuf {
        PathBuf::from(
            self.transcript_path
                .as_deref()
                .unwrap_or(DEFAULT_TRANSCRIPT_PATH),
        )
    }

    /// Per-request timeout, if configured
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }

    /// Initialize the global configuration file with defaults
    pub async fn init() -> Result<PathBuf> {
        let config_dir =
            Self::global_config_dir().context("Could not determine config directory")?;
        let config_path = Self::global_config_path().context("Could not determine config path")?;

        if config_path.exists() {
            anyhow::bail!("Configuration file already exists: {:?}", config_path);
        }

        fs::create_dir_all(&config_dir)
            .await
            .with_context(|| format!("Failed to create directory: {:?}", config_dir))?;

        let default_config = Config {
            theme: Some("dark".to_string()),
            runner_bin: Some(DEFAULT_RUNNER_BIN.to_string()),
            transcript_path: Some(DEFAULT_TRANSCRIPT_PATH.to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&default_config)?;
        fs::write(&config_path, json)
            .await
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_other_takes_precedence() {
        let base = Config {
            theme: Some("dark".to_string()),
            model: Some("llama3".to_string()),
            ..Default::default()
        };
        let overlay = Config {
            model: Some("mistral".to_string()),
            timeout_secs: Some(30),
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.theme, Some("dark".to_string()));
        assert_eq!(merged.model, Some("mistral".to_string()));
        assert_eq!(merged.timeout_secs, Some(30));
    }

    #[test]
    fn test_merge_none_keeps_base() {
        let base = Config {
            runner_bin: Some("/usr/local/bin/ollama".to_string()),
            ..Default::default()
        };

        let merged = base.clone().merge(Config::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::default();
        assert_eq!(config.runner_bin(), "ollama");
        assert_eq!(config.transcript_path(), PathBuf::from("chat_log.txt"));
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("OLLAMACHAT_TEST_MODEL", "phi3");
        let content = r#"{"model": "{env:OLLAMACHAT_TEST_MODEL}"}"#;
        let substituted = Config::substitute_env_vars(content);
        assert_eq!(substituted, r#"{"model": "phi3"}"#);
    }

    #[test]
    fn test_substitute_missing_env_var_is_empty() {
        let content = r#"{"model": "{env:OLLAMACHAT_DOES_NOT_EXIST}"}"#;
        let substituted = Config::substitute_env_vars(content);
        assert_eq!(substituted, r#"{"model": ""}"#);
    }

    #[tokio::test]
    async fn test_load_file_parses_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ollamachat.json");
        tokio::fs::write(&path, r#"{"model": "llama3", "timeout_secs": 60}"#)
            .await
            .unwrap();

        let config = Config::load_file(&path).await.unwrap().unwrap();
        assert_eq!(config.model, Some("llama3".to_string()));
        assert_eq!(config.timeout_secs, Some(60));
    }

    #[tokio::test]
    async fn test_load_file_empty_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ollamachat.json");
        tokio::fs::write(&path, "  \n").await.unwrap();

        let config = Config::load_file(&path).await.unwrap().unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_load_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let config = Config::load_file(&path).await.unwrap();
        assert!(config.is_none());
    }
}
