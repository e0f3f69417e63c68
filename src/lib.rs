//! Ollamachat - terminal chat front-end for local ollama models

pub mod cli;
pub mod config;
pub mod runner;
pub mod transcript;
pub mod tui;
