//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: navigation bar, the page itself, progress bar, status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    pub page_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // navigation bar
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // progress bar
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            page_area: chunks[1],
            progress_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// Rows available to the page for a terminal of `width` × `height`.
    pub fn viewport_height(width: u16, height: u16) -> f64 {
        f64::from(Self::from_area(Rect::new(0, 0, width, height)).page_area.height)
    }
}
