//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Page background.
const BACKGROUND: (u8, u8, u8) = (0, 0, 0);
/// Secondary text colour, rgb(147, 147, 147).
const MUTED: (u8, u8, u8) = (147, 147, 147);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const ACCENT: (u8, u8, u8) = (0, 212, 255);

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page text ──────────────────────────────────────────────
    /// Headline text at the given opacity.
    pub fn headline_style(opacity: f64) -> Style {
        Style::default()
            .fg(fade(WHITE, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style(opacity: f64) -> Style {
        Style::default().fg(fade(WHITE, opacity))
    }

    pub fn label_style(opacity: f64) -> Style {
        Style::default().fg(fade(MUTED, opacity))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default().bg(rgb(BACKGROUND))
    }

    pub fn progress_fill_style() -> Style {
        Style::default().fg(rgb(ACCENT)).bg(Color::DarkGray)
    }

    pub fn progress_track_style() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    pub fn debug_border_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Blend `colour` over the page background.  Terminals have no alpha, so
/// opacity becomes a mix toward black.
pub fn fade(colour: (u8, u8, u8), opacity: f64) -> Color {
    let a = opacity.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (f64::from(bg) + (f64::from(fg) - f64::from(bg)) * a).round() as u8;
    Color::Rgb(
        mix(colour.0, BACKGROUND.0),
        mix(colour.1, BACKGROUND.1),
        mix(colour.2, BACKGROUND.2),
    )
}
