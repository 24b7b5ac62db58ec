//! Progress readout: the thin bar under the page and the debug overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::state::SyncMode;
use crate::core::{path::Waypoint, skip::SkipReason};

use super::theme::Theme;

// ───────────────────────────────────────── progress bar ──────

/// Horizontal bar whose filled width is `progress` × area width.
pub struct ProgressBar {
    pub progress: f64,
}

impl ProgressBar {
    fn filled_width(&self, width: u16) -> u16 {
        let p = if self.progress.is_finite() {
            self.progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (f64::from(width) * p).round() as u16
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::progress_track_style());
        let filled = self.filled_width(area.width);
        for x in area.x..area.x + filled {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_symbol("━").set_style(Theme::progress_fill_style());
            }
        }
    }
}

// ───────────────────────────────────────── debug overlay ─────

const OVERLAY_WIDTH: u16 = 34;

/// Live readout of what the sync loop sees this frame.
pub struct DebugOverlay<'a> {
    pub position: Option<Waypoint>,
    pub last_index: usize,
    pub waypoint_count: usize,
    pub progress: f64,
    pub mode: SyncMode,
    pub last_skip: Option<&'a SkipReason>,
    /// Scene timeline position, `None` while the scene is loading.
    pub scene_timeline: Option<f64>,
}

impl<'a> DebugOverlay<'a> {
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        match self.position {
            Some(p) => {
                lines.push(kv_line("X:", &format!("{:.2}", p.x)));
                lines.push(kv_line("Y:", &format!("{:.2}", p.y)));
                lines.push(kv_line("Z:", &format!("{:.2}", p.z)));
            }
            None => lines.push(kv_line("Position:", "n/a")),
        }
        lines.push(kv_line(
            "Sequence:",
            &format!("{}/{}", self.last_index + 1, self.waypoint_count),
        ));
        lines.push(kv_line("Progress:", &format!("{:.1}%", self.progress * 100.0)));
        lines.push(kv_line("Mode:", self.mode.label()));
        let scene = match self.scene_timeline {
            Some(t) => format!("t = {t:.2}"),
            None => "loading".to_string(),
        };
        lines.push(kv_line("Scene:", &scene));
        if let Some(skip) = self.last_skip {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!("skip: {skip}"),
                Theme::label_style(1.0),
            )));
        }
        lines
    }
}

impl<'a> Widget for DebugOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let w = OVERLAY_WIDTH.min(area.width);
        let h = (lines.len() as u16 + 2).min(area.height);
        if w < 4 || h < 3 {
            return;
        }
        let rect = Rect::new(area.x + 1u16.min(area.width - w), area.y, w, h);
        Clear.render(rect, buf);

        let block = Block::default()
            .title(" Debug ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::debug_border_style());
        let inner = block.inner(rect);
        block.render(rect, buf);

        Paragraph::new(lines)
            .style(Theme::page_style())
            .render(inner, buf);
    }
}

fn kv_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Theme::label_style(1.0)),
        Span::styled(value.to_string(), Style::default()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn bar_fills_proportionally() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar { progress: 0.25 }.render(area, &mut buf);
        assert_eq!(rendered_text(&buf).matches('━').count(), 10);
    }

    #[test]
    fn bar_clamps_out_of_range_progress() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar { progress: 1.7 }.render(area, &mut buf);
        assert_eq!(rendered_text(&buf).matches('━').count(), 20);
    }

    #[test]
    fn overlay_shows_one_based_sequence() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        DebugOverlay {
            position: Some(Waypoint::new(1.234, -0.5, 7.0)),
            last_index: 0,
            waypoint_count: 86,
            progress: 0.5,
            mode: SyncMode::Tracked,
            last_skip: None,
            scene_timeline: Some(0.0),
        }
        .render(area, &mut buf);
        let text = rendered_text(&buf);
        assert!(text.contains("1/86"));
        assert!(text.contains("1.23"));
        assert!(text.contains("50.0%"));
    }
}
