//! Loading indicator: a small spinner + label drawn while the scene has not
//! finished loading.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Frames each spinner glyph stays on screen.
const FRAMES_PER_GLYPH: u64 = 4;

/// Positions itself top-right of `area`; invisible when `visible` is false.
pub struct LoadingIndicator {
    pub visible: bool,
    /// Monotonically increasing frame counter (drives the spinner glyph).
    pub tick: u64,
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 20 || area.height == 0 {
            return;
        }

        let glyph = SPINNER_FRAMES[((self.tick / FRAMES_PER_GLYPH) as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {glyph} loading scene ");

        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, area.y, &line, label_width);
    }
}
