//! Page geometry: scrollable height and the progress ↔ offset conversion.

pub const DEFAULT_PAGE_HEIGHT_MULTIPLIER: f64 = 50.0;

/// Viewport and total page height, in the host's scroll units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageGeometry {
    pub viewport_height: f64,
    pub total_page_height: f64,
}

impl PageGeometry {
    /// Largest valid scroll offset (`total - viewport`, never negative).
    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_page_height - self.viewport_height).max(0.0)
    }

    /// Normalized scroll progress for an absolute offset, clamped to [0, 1].
    pub fn scroll_progress(&self, offset: f64) -> f64 {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (offset / max).clamp(0.0, 1.0)
    }

    /// Clamp an offset into the scrollable range.
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll_offset())
    }
}

/// Sizes the page so the scroll range can resolve every waypoint.
#[derive(Debug, Clone, Copy)]
pub struct PageHeightController {
    multiplier: f64,
}

impl PageHeightController {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: multiplier.max(1.0),
        }
    }

    /// Geometry for a freshly measured viewport.
    pub fn layout(&self, viewport_height: f64) -> PageGeometry {
        let viewport_height = viewport_height.max(0.0);
        PageGeometry {
            viewport_height,
            total_page_height: viewport_height * self.multiplier,
        }
    }
}

impl Default for PageHeightController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_HEIGHT_MULTIPLIER)
    }
}
