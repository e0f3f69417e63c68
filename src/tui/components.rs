//! Reusable TUI components.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::transcript::Entry;

/// Header component showing application title, model, and status
pub struct Header<'a> {
    pub title: &'a str,
    pub model: &'a str,
    pub status: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Min(20),
                Constraint::Length(20),
            ])
            .split(area);

        // Title
        let title = Paragraph::new(self.title)
            .style(self.theme.text_accent())
            .alignment(Alignment::Left);
        title.render(chunks[0], buf);

        // Model
        let model = Paragraph::new(self.model)
            .style(self.theme.text_dim())
            .alignment(Alignment::Center);
        model.render(chunks[1], buf);

        // Status
        let status_style = match self.status {
            "Ready" => self.theme.text().fg(self.theme.success),
            "Processing" => self.theme.text().fg(self.theme.accent),
            "Error" => self.theme.text().fg(self.theme.error),
            _ => self.theme.text_dim(),
        };
        let status = Paragraph::new(self.status)
            .style(status_style)
            .alignment(Alignment::Right);
        status.render(chunks[2], buf);
    }
}

/// Widget for a single transcript entry
pub struct EntryWidget<'a> {
    pub entry: &'a Entry,
    pub theme: &'a Theme,
}

impl<'a> EntryWidget<'a> {
    /// Number of terminal rows this entry occupies
    pub fn height(&self) -> u16 {
        self.entry.text.lines().count().max(1) as u16
    }
}

impl<'a> Widget for EntryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let timestamp = self.entry.timestamp.format("%H:%M:%S").to_string();
        let label = self.entry.sender.label();
        let label_style = self.theme.sender(self.entry.sender);

        let mut lines: Vec<Line> = Vec::new();
        for (i, text_line) in self.entry.text.lines().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(timestamp.clone(), self.theme.text_dim()),
                    Span::raw(" "),
                    Span::styled(format!("{}: ", label), label_style),
                    Span::styled(text_line.to_string(), self.theme.text()),
                ]));
            } else {
                // Continuation lines are indented under the label
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(timestamp.len() + 1)),
                    Span::styled(text_line.to_string(), self.theme.text()),
                ]));
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(timestamp, self.theme.text_dim()),
                Span::raw(" "),
                Span::styled(format!("{}: ", label), label_style),
            ]));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        paragraph.render(area, buf);
    }
}

/// Input box component
pub struct InputBox<'a> {
    pub content: &'a str,
    pub cursor_position: usize,
    pub placeholder: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for InputBox<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display_text = if self.content.is_empty() {
            Span::styled(self.placeholder, self.theme.text_dim())
        } else {
            Span::styled(self.content, self.theme.text())
        };

        let paragraph = Paragraph::new(display_text).wrap(Wrap { trim: false });
        paragraph.render(area, buf);
    }
}

/// Status bar component
pub struct StatusBar<'a> {
    pub left: &'a str,
    pub center: &'a str,
    pub right: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        let left = Paragraph::new(self.left)
            .style(self.theme.text_dim())
            .alignment(Alignment::Left);
        left.render(chunks[0], buf);

        let center = Paragraph::new(self.center)
            .style(self.theme.text_dim())
            .alignment(Alignment::Center);
        center.render(chunks[1], buf);

        let right = Paragraph::new(self.right)
            .style(self.theme.text_dim())
            .alignment(Alignment::Right);
        right.render(chunks[2], buf);
    }
}

/// Loading spinner component
pub struct Spinner<'a> {
    pub message: &'a str,
    pub frame: usize,
    pub theme: &'a Theme,
}

impl<'a> Widget for Spinner<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        let frame = frames[self.frame % frames.len()];

        let text = format!("{} {}", frame, self.message);
        let paragraph = Paragraph::new(text)
            .style(self.theme.text_accent())
            .alignment(Alignment::Left);
        paragraph.render(area, buf);
    }
}
