//! Main TUI event loop.
//!
//! Terminal setup, key dispatch, and the worker-to-UI channel. A submitted
//! prompt spawns one background task that performs the subprocess
//! round-trip and sends exactly one `AppEvent::RunnerDone` back; the event
//! loop consumes it, appends the resulting transcript entry, and re-enables
//! sending.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use super::input::{key_to_action, Action};
use super::state::App;
use super::types::{AppEvent, DialogType};
use super::ui;
use crate::config::Config;
use crate::runner::Runner;

/// Run the TUI application
pub async fn run(initial_prompt: Option<String>, model: Option<String>) -> Result<()> {
    // Check if we're running in a TTY
    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!(
            "This command requires a TTY (terminal). Please run in an interactive terminal,\n\
            or use the 'prompt' command instead for non-interactive usage:\n  \
            ollamachat prompt \"your message here\""
        );
    }

    let config = Config::load().await?;
    let runner = Runner::new(config.runner_bin()).with_timeout(config.timeout());

    // Model registry lookup happens once, before the terminal is taken
    // over, so a failure stays visible on stderr.
    let models = runner
        .list_models()
        .await
        .context("Failed to retrieve models")?;
    if models.is_empty() {
        anyhow::bail!("No models found. Please install models (e.g. 'ollama pull llama3') and try again.");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(&config, models, model);

    // If there's an initial prompt, set it as input
    if let Some(prompt) = initial_prompt {
        app.input = prompt;
        app.cursor_position = app.input.len();
    }

    // Event channel for request completions
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(16);

    // Run event loop
    let result = run_app(&mut terminal, &mut app, event_tx, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = std::time::Instant::now();

    loop {
        // Draw UI
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle dialog input if dialog is open
                if app.dialog.is_some() {
                    handle_dialog_input(app, key);
                } else {
                    match key_to_action(key) {
                        Action::ModelSelector => {
                            app.open_model_selector();
                        }
                        Action::SaveTranscript => {
                            app.save_transcript();
                        }
                        Action::Submit => {
                            // Send is disabled while a request is in flight
                            if !app.is_processing {
                                if let Some(prompt) = app.take_input() {
                                    dispatch_request(app, prompt, event_tx.clone());
                                }
                            }
                        }
                        action => {
                            app.handle_action(action);
                        }
                    }
                }
            }
        }

        // Process request completions
        while let Ok(event) = event_rx.try_recv() {
            match event {
                AppEvent::RunnerDone(result) => {
                    app.finish_request(result);
                }
            }
        }

        // Tick for animations
        if last_tick.elapsed() >= tick_rate {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            last_tick = std::time::Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Spawn the background task for one prompt round-trip
fn dispatch_request(app: &mut App, prompt: String, tx: mpsc::Sender<AppEvent>) {
    app.begin_request(&prompt);

    let runner = app.runner.clone();
    let model = app.model_id.clone();
    tokio::spawn(async move {
        let result = runner.generate(&model, &prompt).await;
        // The receiver only disappears when the loop is gone
        let _ = tx.send(AppEvent::RunnerDone(result)).await;
    });
}

/// Handle input when a dialog is open
fn handle_dialog_input(app: &mut App, key: crossterm::event::KeyEvent) {
    let dialog_type = app.dialog.as_ref().map(|d| d.dialog_type.clone());

    if dialog_type != Some(DialogType::ModelSelector) {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }
        KeyCode::Enter => {
            // Select item
            let selected = app
                .dialog
                .as_ref()
                .and_then(|d| d.selected_item())
                .map(|item| item.id.clone());
            if let Some(model_id) = selected {
                app.set_model(&model_id);
            }
        }
        KeyCode::Up => {
            if let Some(dialog) = &mut app.dialog {
                dialog.move_up();
            }
        }
        KeyCode::Down => {
            if let Some(dialog) = &mut app.dialog {
                dialog.move_down();
            }
        }
        KeyCode::Char(c) => {
            if let Some(dialog) = &mut app.dialog {
                dialog.search_query.push(c);
                dialog.update_filter();
            }
        }
        KeyCode::Backspace => {
            if let Some(dialog) = &mut app.dialog {
                dialog.search_query.pop();
                dialog.update_filter();
            }
        }
        _ => {}
    }
}
