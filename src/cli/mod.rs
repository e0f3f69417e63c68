//! CLI subcommand implementations.

pub mod config;
pub mod models;
pub mod prompt;
pub mod run;
