//! The scrolling page: hero title, feature text blocks and navigation bar.
//!
//! Block positions and opacities come straight from `core::phase`; this
//! module only decides what each block says and where its lines land.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::phase::{
    compute_phase, hero_phase, nav_opacity, PhaseStage, PhaseValue, PhaseWindow,
};

use super::theme::Theme;

/// Below this opacity a block is not drawn at all.
const MIN_VISIBLE_OPACITY: f64 = 0.02;

const NAV_ITEMS: &[&str] = &["Ori Scan", "Comparison", "Testimonial", "About", "New Revenue"];

// ───────────────────────────────────────── content ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Headline,
    Label,
    Body,
    Blank,
}

type BlockLines<'a> = Vec<(LineKind, &'a str)>;

fn hero_content() -> BlockLines<'static> {
    use LineKind::*;
    vec![
        (Headline, "Ori Scan 2.0"),
        (Blank, ""),
        (Body, "The Ori Tech Membership is the first-of-its-kind"),
        (Body, "technology subscription starting at $549/mo."),
        (Blank, ""),
        (Label, "No hidden fees and no financing needed."),
        (Label, "Get Ori 2.0 and go digital in 30-days or less with your new membership."),
    ]
}

/// Text for a phase window.  Unknown labels render the label itself.
fn block_content(label: &str) -> BlockLines<'_> {
    use LineKind::*;
    match label {
        "stage5" => vec![(Headline, "Half the Cost."), (Headline, "Double the Value.")],
        "tip" => vec![
            (Headline, "Incredibly Compact"),
            (Blank, ""),
            (Label, "Tip"),
            (Body, "3.85 inches"),
            (Label, "Handle"),
            (Body, "5.25 inches"),
        ],
        "familiar" => vec![
            (Label, "Familiar Feel"),
            (Body, "Similar in weight and"),
            (Body, "feel to your handpiece"),
            (Body, "instrument"),
        ],
        "crafted" => vec![(Label, "Crafted with"), (Body, "Aerospace Aluminum")],
        "lightweight" => vec![(Label, "Extremely Lightweight"), (Body, "144 grams")],
        "phase-logic" => vec![(Label, "OriPhaseLogic™"), (Body, "Technology")],
        other => vec![(Headline, other)],
    }
}

fn line_style(kind: LineKind, opacity: f64) -> Style {
    match kind {
        LineKind::Headline => Theme::headline_style(opacity),
        LineKind::Label => Theme::label_style(opacity),
        LineKind::Body | LineKind::Blank => Theme::body_style(opacity),
    }
}

/// Draw `lines` centred in `area`, shifted down by `value.offset` rows.
fn render_block(lines: &[(LineKind, &str)], value: PhaseValue, area: Rect, buf: &mut Buffer) {
    if value.opacity < MIN_VISIBLE_OPACITY || area.height == 0 {
        return;
    }
    let block_h = lines.len() as i32;
    let top = i32::from(area.y) + (i32::from(area.height) - block_h) / 2 + value.offset.round() as i32;
    let bottom = i32::from(area.y) + i32::from(area.height);

    for (i, (kind, text)) in lines.iter().enumerate() {
        let y = top + i as i32;
        if y < i32::from(area.y) || y >= bottom || *kind == LineKind::Blank {
            continue;
        }
        let width = (text.chars().count() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let line = Line::from(Span::styled(*text, line_style(*kind, value.opacity)));
        buf.set_line(x, y as u16, &line, width);
    }
}

// ───────────────────────────────────────── widgets ───────────

/// All text blocks, evaluated at one progress value.
pub struct PageWidget<'a> {
    pub windows: &'a [PhaseWindow],
    pub progress: f64,
    pub viewport_height: f64,
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());

        render_block(
            &hero_content(),
            hero_phase(self.progress, self.viewport_height),
            area,
            buf,
        );

        for window in self.windows {
            if matches!(window.stage(self.progress), PhaseStage::Before | PhaseStage::After) {
                continue;
            }
            let value = compute_phase(self.progress, window, self.viewport_height);
            render_block(&block_content(&window.label), value, area, buf);
        }
    }
}

/// Top navigation bar; fades out as soon as the page starts moving.
pub struct NavBar {
    pub progress: f64,
}

impl Widget for NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        let opacity = nav_opacity(self.progress);
        if opacity < MIN_VISIBLE_OPACITY || area.height == 0 {
            return;
        }
        let text = NAV_ITEMS.join("    ");
        let width = (text.chars().count() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let line = Line::from(Span::styled(text, Theme::body_style(opacity)));
        buf.set_line(x, area.y, &line, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::phase::default_windows;

    fn rendered_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn hero_is_visible_at_the_top() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let windows = default_windows();
        PageWidget {
            windows: &windows,
            progress: 0.0,
            viewport_height: 20.0,
        }
        .render(area, &mut buf);
        let text = rendered_text(&buf);
        assert!(text.contains("Ori Scan 2.0"));
        assert!(!text.contains("Aerospace Aluminum"));
    }

    #[test]
    fn block_peaks_centred_at_window_midpoint() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let windows = default_windows();
        PageWidget {
            windows: &windows,
            progress: windows[3].mid(),
            viewport_height: 20.0,
        }
        .render(area, &mut buf);
        let text = rendered_text(&buf);
        assert!(text.contains("Aerospace Aluminum"));
        assert!(!text.contains("Ori Scan 2.0"));
    }

    #[test]
    fn unknown_labels_render_themselves() {
        let lines = block_content("custom-block");
        assert_eq!(lines, vec![(LineKind::Headline, "custom-block")]);
    }
}
