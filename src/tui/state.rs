//! Application state management.
//!
//! This module contains the App struct and its associated methods for
//! managing the TUI application state: the input line, the transcript, the
//! selected model, and the single in-flight request flag.

use std::path::PathBuf;

use super::input::Action;
use super::theme::Theme;
use super::types::{DialogState, DialogType, SelectItem};
use crate::config::Config;
use crate::runner::{Runner, RunnerError};
use crate::transcript::{Sender, Transcript};

/// Notice appended when the user submits an empty prompt
pub const EMPTY_PROMPT_NOTICE: &str = "Please enter some text.";

/// Notice appended when the runner exits 0 with empty stdout
pub const NO_OUTPUT_NOTICE: &str = "Model did not return any output.";

/// Application state
pub struct App {
    /// Current input text
    pub input: String,
    /// Cursor position in input
    pub cursor_position: usize,
    /// Chat transcript
    pub transcript: Transcript,
    /// Models discovered at startup
    pub models: Vec<String>,
    /// Currently selected model
    pub model_id: String,
    /// Current status
    pub status: String,
    /// Is a request currently in flight (send disabled)
    pub is_processing: bool,
    /// Spinner animation frame
    pub spinner_frame: usize,
    /// Theme
    pub theme: Theme,
    /// Should quit
    pub should_quit: bool,
    /// Current dialog state
    pub dialog: Option<DialogState>,
    /// Runner handle for dispatching requests
    pub runner: Runner,
    /// Transcript save target
    pub transcript_path: PathBuf,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            transcript: Transcript::new(),
            models: Vec::new(),
            model_id: String::new(),
            status: "Ready".to_string(),
            is_processing: false,
            spinner_frame: 0,
            theme: Theme::dark(),
            should_quit: false,
            dialog: None,
            runner: Runner::default(),
            transcript_path: PathBuf::from(crate::config::DEFAULT_TRANSCRIPT_PATH),
        }
    }
}

impl App {
    /// Create a new app from configuration and the startup model list.
    ///
    /// `model_arg` comes from the CLI; priority is CLI arg > config >
    /// first listed model. The caller guarantees `models` is non-empty.
    pub fn new(config: &Config, models: Vec<String>, model_arg: Option<String>) -> Self {
        let mut app = App::default();

        app.model_id = model_arg
            .or_else(|| config.model.clone())
            .or_else(|| models.first().cloned())
            .unwrap_or_default();
        app.models = models;

        app.runner = Runner::new(config.runner_bin()).with_timeout(config.timeout());
        app.transcript_path = config.transcript_path();

        if let Some(theme_name) = &config.theme {
            app.theme = Theme::by_name(theme_name);
        }

        app
    }

    /// Open the model selector dialog over the startup model list
    pub fn open_model_selector(&mut self) {
        let items: Vec<SelectItem> = self
            .models
            .iter()
            .map(|m| SelectItem {
                id: m.clone(),
                label: m.clone(),
                description: None,
            })
            .collect();

        let dialog = DialogState::new(DialogType::ModelSelector, "Select Model").with_items(items);
        self.dialog = Some(dialog);
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Set the current model for subsequent requests
    pub fn set_model(&mut self, model_id: &str) {
        self.model_id = model_id.to_string();
        self.close_dialog();
    }

    /// Handle input action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Char(c) => {
                self.input.insert(self.cursor_position, c);
                self.cursor_position += c.len_utf8();
            }
            Action::Backspace => {
                if self.cursor_position > 0 {
                    let prev_char_boundary = self.input[..self.cursor_position]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.remove(prev_char_boundary);
                    self.cursor_position = prev_char_boundary;
                }
            }
            Action::Delete => {
                if self.cursor_position < self.input.len() {
                    self.input.remove(self.cursor_position);
                }
            }
            Action::Left => {
                if self.cursor_position > 0 {
                    self.cursor_position = self.input[..self.cursor_position]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            Action::Right => {
                if self.cursor_position < self.input.len() {
                    self.cursor_position = self.input[self.cursor_position..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor_position + i)
                        .unwrap_or(self.input.len());
                }
            }
            Action::Home => {
                self.cursor_position = 0;
            }
            Action::End => {
                self.cursor_position = self.input.len();
            }
            Action::Newline => {
                self.input.insert(self.cursor_position, '\n');
                self.cursor_position += 1;
            }
            Action::ClearInput => {
                self.input.clear();
                self.cursor_position = 0;
            }
            _ => {}
        }
    }

    /// Take the submitted input, leaving the input box empty.
    ///
    /// Whitespace-only input yields None and appends the advisory notice
    /// instead; no request is dispatched for it.
    pub fn take_input(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            self.transcript.push(Sender::System, EMPTY_PROMPT_NOTICE);
            self.input.clear();
            self.cursor_position = 0;
            return None;
        }
        let input = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        Some(input.trim().to_string())
    }

    /// Record a dispatched request: user entry, model notice, send disabled
    pub fn begin_request(&mut self, prompt: &str) {
        self.transcript.push(Sender::User, prompt);
        self.transcript
            .push(Sender::System, format!("Using model: {}", self.model_id));
        self.is_processing = true;
        self.status = "Processing".to_string();
    }

    /// Consume a request completion: append exactly one entry and
    /// re-enable sending. Every completion path runs through here.
    pub fn finish_request(&mut self, result: Result<String, RunnerError>) {
        match result {
            Ok(output) => {
                let response = output.trim();
                if response.is_empty() {
                    self.transcript.push(Sender::System, NO_OUTPUT_NOTICE);
                } else {
                    self.transcript.push(Sender::Model, response);
                }
                self.status = "Ready".to_string();
            }
            Err(e) => {
                self.transcript.push(Sender::System, format!("Error: {}", e));
                self.status = "Error".to_string();
            }
        }
        self.is_processing = false;
    }

    /// Save the transcript; a failure is surfaced inline as a system entry
    pub fn save_transcript(&mut self) {
        match self.transcript.save(&self.transcript_path) {
            Ok(()) => {
                self.status = format!("Saved {}", self.transcript_path.display());
            }
            Err(e) => {
                self.transcript.push(Sender::System, format!("Error: {}", e));
            }
        }
    }
}
