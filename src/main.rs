use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod runner;
mod transcript;
mod tui;

#[derive(Parser)]
#[command(name = "ollamachat")]
#[command(about = "Terminal chat front-end for local ollama models", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    #[command(alias = "tui")]
    Chat {
        /// Initial prompt to pre-fill in the input box
        #[arg(short, long)]
        prompt: Option<String>,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single prompt without the TUI
    #[command(alias = "ask")]
    Prompt {
        /// The prompt to send
        prompt: String,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List installed models
    Models,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Initialize configuration file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Change directory if specified
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }

    match cli.command {
        Some(Commands::Chat { prompt, model }) => {
            cli::run::execute(prompt, model).await?;
        }
        Some(Commands::Prompt { prompt, model }) => {
            cli::prompt::execute(&prompt, model.as_deref()).await?;
        }
        Some(Commands::Models) => {
            cli::models::execute().await?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                cli::config::show().await?;
            }
            ConfigCommands::Path => {
                cli::config::path().await?;
            }
            ConfigCommands::Init => {
                cli::config::init().await?;
            }
        },
        Some(Commands::Version) => {
            println!("ollamachat {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            // Default: start the chat TUI
            cli::run::execute(None, None).await?;
        }
    }

    Ok(())
}
