//! Chat command - starts the TUI.

use anyhow::Result;

/// Execute the chat command (starts TUI)
pub async fn execute(prompt: Option<String>, model: Option<String>) -> Result<()> {
    crate::tui::run(prompt, model).await
}
