//! Append-only chat transcript.
//!
//! Every rendered line of the conversation lives here: user prompts, model
//! responses, and system notices. Entries are only ever appended; saving
//! flushes the rendered text verbatim, overwriting the target file.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Model,
    System,
}

impl Sender {
    /// Label used when rendering the entry
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Model => "Model",
            Sender::System => "System",
        }
    }
}

/// One timestamped, sender-tagged line of chat history
#[derive(Debug, Clone)]
pub struct Entry {
    pub timestamp: DateTime<Local>,
    pub sender: Sender,
    pub text: String,
}

impl Entry {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            sender,
            text: text.into(),
        }
    }

    /// Render as a transcript line: `HH:MM:SS <label>: <text>\n`
    pub fn render(&self) -> String {
        format!(
            "{} {}: {}\n",
            self.timestamp.format("%H:%M:%S"),
            self.sender.label(),
            self.text
        )
    }
}

/// Append-only ordered sequence of transcript entries
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.entries.push(Entry::new(sender, text));
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the full transcript: the exact concatenation of all entries
    /// in append order.
    pub fn render(&self) -> String {
        self.entries.iter().map(Entry::render).collect()
    }

    /// Write the rendered transcript to `path`, overwriting any prior file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write transcript to {:?}", path))
    }
}
