//! Parrot/neon theme tokens for the range slider TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (filled range, focus)
//! - **Handle**: White thumbs; the focused one in neon green
//! - **Tooltip**: Cool purple value bubbles
//! - **Warning / Negative**: Neon orange / hot pink status messages
//! - **Muted**: Steel blue (bare track, hints)

use ratatui::style::{Color, Modifier, Style};

/// Parrot/neon theme for the slider
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (filled range, focused border)
    pub accent: Color,
    /// Neon green (focused handle)
    pub positive: Color,
    /// Hot pink (errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Cool purple (tooltips)
    pub neutral: Color,
    /// Steel blue (bare track, hints)
    pub muted: Color,
    /// White (handles, primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    pub fn track(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn filled(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Handle glyph style; the focused handle stands out.
    pub fn handle(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.positive).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    pub fn tooltip(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.neutral)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.negative).add_modifier(Modifier::BOLD)
    }
}
