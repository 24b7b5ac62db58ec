//! Frame-over-frame exponential smoothing of progress and scroll offset.
//!
//! Two independent single-pole filters: one for the progress readout that
//! drives the text animations, one for the scroll position written back to
//! the page.  The scroll filter defaults to a lower factor so programmatic
//! scrolling stays gentle.

pub const DEFAULT_PROGRESS_SMOOTHING: f64 = 0.15;
pub const DEFAULT_SCROLL_SMOOTHING: f64 = 0.10;

/// Move `current` a fraction `factor` of the way toward `target`.
pub fn ema(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Values produced by one accepted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedFrame {
    pub progress: f64,
    pub scroll_offset: f64,
}

#[derive(Debug, Clone)]
pub struct ProgressSmoother {
    progress_factor: f64,
    scroll_factor: f64,
    progress: f64,
    scroll_offset: f64,
}

impl ProgressSmoother {
    pub fn new(progress_factor: f64, scroll_factor: f64) -> Self {
        Self {
            progress_factor,
            scroll_factor,
            progress: 0.0,
            scroll_offset: 0.0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Forget the smoothed progress.  The scroll filter keeps its value so
    /// the page does not snap back to the top.
    pub fn reset_progress(&mut self) {
        self.progress = 0.0;
    }

    /// Restart both filters from known values, e.g. when the page was moved
    /// by something other than this filter.
    pub fn seed(&mut self, progress: f64, scroll_offset: f64) {
        self.progress = progress;
        self.scroll_offset = scroll_offset;
    }

    /// Advance both filters toward `target_progress`.  `max_scroll_offset` is
    /// passed in fresh every frame because the page height can change.
    pub fn step(&mut self, target_progress: f64, max_scroll_offset: f64) -> SmoothedFrame {
        self.progress = ema(self.progress, target_progress, self.progress_factor);

        let target_scroll = max_scroll_offset.max(0.0) * target_progress;
        self.scroll_offset = ema(self.scroll_offset, target_scroll, self.scroll_factor);

        SmoothedFrame {
            progress: self.progress,
            scroll_offset: self.scroll_offset,
        }
    }
}

impl Default for ProgressSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_SMOOTHING, DEFAULT_SCROLL_SMOOTHING)
    }
}
