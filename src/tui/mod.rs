//! Terminal User Interface module using ratatui.
//!
//! This provides the interactive chat surface: a scrollback transcript, an
//! input box, and a model selector dialog.

mod app;
mod components;
mod input;
mod state;
mod theme;
mod types;
mod ui;

pub use app::run;
pub use state::App;
pub use types::*;
