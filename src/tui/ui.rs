//! Main UI layout and rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::components::{EntryWidget, Header, InputBox, Spinner, StatusBar};
use super::state::App;
use super::theme::Theme;
use super::types::DialogState;

/// Main UI rendering function
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let size = frame.area();

    // Main layout: Header, Transcript, Input, Status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Transcript
            Constraint::Length(5), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    // Render header
    let header = Header {
        title: "ollamachat",
        model: &app.model_id,
        status: &app.status,
        theme,
    };
    frame.render_widget(header, chunks[0]);

    // Render transcript
    render_transcript(frame, app, chunks[1]);

    // Render input
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(!app.is_processing))
        .title(" Message ");
    let input_inner = input_block.inner(chunks[2]);
    frame.render_widget(input_block, chunks[2]);

    let input = InputBox {
        content: &app.input,
        cursor_position: app.cursor_position,
        placeholder: "Type a message... (Enter to send, Shift+Enter for newline)",
        theme,
    };
    frame.render_widget(input, input_inner);

    // Render status bar
    let center = if app.is_processing {
        "Processing...".to_string()
    } else {
        "Ready".to_string()
    };
    let right = format!("{} models", app.models.len());

    let status = StatusBar {
        left: "Ctrl+M models | Ctrl+S save | Ctrl+C quit",
        center: &center,
        right: &right,
        theme,
    };
    frame.render_widget(status, chunks[3]);

    // Render dialog if open
    if let Some(dialog) = &app.dialog {
        render_dialog(frame, dialog, theme, size);
    }
}

/// Render the transcript area
fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border(false))
        .title(" Chat ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.transcript.is_empty() {
        // Show welcome message
        let welcome = format!(
            "Welcome to ollamachat!\n\n\
             Model: {}\n\n\
             Tips:\n\
             • Type your message and press Enter to send\n\
             • Use Shift+Enter for multi-line input\n\
             • Press Ctrl+M to switch models\n\
             • Press Ctrl+S to save the transcript\n\
             • Press Ctrl+C to quit",
            app.model_id
        );
        let paragraph = Paragraph::new(welcome)
            .style(app.theme.text_dim())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
        return;
    }

    // Lay out the newest entries from the bottom up, then render top-down
    let mut visible: Vec<(&crate::transcript::Entry, u16)> = Vec::new();
    let mut used: u16 = 0;
    for entry in app.transcript.entries().iter().rev() {
        let height = EntryWidget {
            entry,
            theme: &app.theme,
        }
        .height();
        if used + height > inner.height {
            break;
        }
        used += height;
        visible.push((entry, height));
    }

    let mut current_y = inner.y;
    for &(entry, height) in visible.iter().rev() {
        let entry_area = Rect::new(inner.x, current_y, inner.width, height);
        let widget = EntryWidget {
            entry,
            theme: &app.theme,
        };
        frame.render_widget(widget, entry_area);
        current_y += height;
    }

    // Show spinner if processing
    if app.is_processing && inner.height > 0 {
        let spinner_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        let spinner = Spinner {
            message: "Thinking...",
            frame: app.spinner_frame,
            theme: &app.theme,
        };
        frame.render_widget(spinner, spinner_area);
    }
}

/// Render a dialog overlay
fn render_dialog(frame: &mut Frame, dialog: &DialogState, theme: &Theme, area: Rect) {
    // Calculate dialog size
    let width = area.width.clamp(40, 60);
    let height = area.height.clamp(10, 20);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let dialog_area = Rect::new(x, y, width, height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    // Draw dialog border
    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    render_select_dialog(frame, dialog, theme, inner);
}

/// Render the model selection dialog
fn render_select_dialog(frame: &mut Frame, dialog: &DialogState, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Length(1), // Divider
            Constraint::Min(3),    // List
            Constraint::Length(1), // Help
        ])
        .split(area);

    // Search input
    let search_text = if dialog.search_query.is_empty() {
        Span::styled("Type to search...", Style::default().fg(theme.dim))
    } else {
        Span::styled(&dialog.search_query, Style::default().fg(theme.foreground))
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(theme.accent)),
        search_text,
    ]));
    frame.render_widget(search, chunks[0]);

    // List items
    let visible_count = chunks[2].height as usize;
    let start_index = dialog.selected_index.saturating_sub(visible_count / 2);

    let items: Vec<ListItem> = dialog
        .filtered_indices
        .iter()
        .skip(start_index)
        .take(visible_count)
        .enumerate()
        .map(|(i, &item_idx)| {
            let item = &dialog.items[item_idx];
            let is_selected = start_index + i == dialog.selected_index;

            let style = if is_selected {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };

            ListItem::new(item.label.clone()).style(style)
        })
        .collect();

    if items.is_empty() {
        let empty = Paragraph::new("No models found")
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[2]);
    } else {
        let list = List::new(items);
        frame.render_widget(list, chunks[2]);
    }

    // Help text
    let help = Paragraph::new("Enter: Select | Esc: Cancel | Type to search")
        .style(Style::default().fg(theme.dim))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}
