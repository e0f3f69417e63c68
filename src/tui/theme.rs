//! TUI theme definitions.

use ratatui::style::{Color, Style};

use crate::transcript::Sender;

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,

    // Per-sender transcript colors
    pub user: Color,
    pub model: Color,
    pub system: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),

            background: Color::Rgb(30, 30, 30),
            foreground: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(138, 180, 248),
            error: Color::Rgb(244, 135, 135),
            success: Color::Rgb(144, 238, 144),

            user: Color::Rgb(138, 180, 248),
            model: Color::Rgb(144, 238, 144),
            system: Color::Rgb(255, 180, 200),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(40, 40, 40),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(0, 100, 200),
            error: Color::Rgb(200, 50, 50),
            success: Color::Rgb(50, 150, 50),

            user: Color::Rgb(0, 100, 200),
            model: Color::Rgb(50, 150, 50),
            system: Color::Rgb(190, 60, 110),
        }
    }

    /// Look a theme up by name, falling back to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for text
    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for dimmed text
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Get style for accent text
    pub fn text_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Get style for a transcript sender label
    pub fn sender(&self, sender: Sender) -> Style {
        let color = match sender {
            Sender::User => self.user,
            Sender::Model => self.model,
            Sender::System => self.system,
        };
        Style::default().fg(color)
    }

    /// Get border style
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.dim)
        }
    }
}
