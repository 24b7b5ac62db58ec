//! Scroll-to-phase mapping: per-text-block enter/exit animation values.
//!
//! Every output here is a pure function of one progress scalar.  Windows are
//! independent: nothing stops two blocks from being visible at once if their
//! ranges overlap.

/// Fraction of the viewport a block travels while entering/exiting.
const TRAVEL_FRACTION: f64 = 0.8;
/// Hero block travel on exit.
const HERO_TRAVEL_FRACTION: f64 = 0.6;
/// Travel used before the viewport has been measured.
const UNMEASURED_TRAVEL: f64 = 500.0;

// ───────────────────────────────────────── keyframes ─────────

/// Piecewise-linear interpolation through `(input[i], output[i])` stops.
///
/// Inputs must be ascending.  Values outside the input range clamp to the
/// first/last output.
pub fn interpolate(input: &[f64], output: &[f64], x: f64) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }
    if x <= input[0] {
        return output[0];
    }
    if x >= input[n - 1] {
        return output[n - 1];
    }
    for i in 1..n {
        if x <= input[i] {
            let span = input[i] - input[i - 1];
            if span <= 0.0 {
                return output[i];
            }
            let t = (x - input[i - 1]) / span;
            return output[i - 1] + (output[i] - output[i - 1]) * t;
        }
    }
    output[n - 1]
}

// ───────────────────────────────────────── windows ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryDirection {
    /// Slides up from below the viewport centre.
    #[default]
    FromBottom,
    /// Starts in place.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitDirection {
    /// Slides up and out.
    #[default]
    ToTop,
    None,
}

/// Progress interval over which one text block is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseWindow {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub entry: EntryDirection,
    pub exit: ExitDirection,
}

impl PhaseWindow {
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            entry: EntryDirection::FromBottom,
            exit: ExitDirection::ToTop,
        }
    }

    pub fn mid(&self) -> f64 {
        self.start + (self.end - self.start) / 2.0
    }

    /// `true` when the window is well-formed (`0 ≤ start < end ≤ 1`).
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && 0.0 <= self.start
            && self.start < self.end
            && self.end <= 1.0
    }

    /// Where `p` sits relative to this window.
    pub fn stage(&self, p: f64) -> PhaseStage {
        let mid = self.mid();
        if p < self.start {
            PhaseStage::Before
        } else if p < mid {
            PhaseStage::Entering
        } else if p == mid {
            PhaseStage::Peak
        } else if p <= self.end {
            PhaseStage::Exiting
        } else {
            PhaseStage::After
        }
    }
}

/// Lifecycle of a block as a function of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStage {
    Before,
    Entering,
    Peak,
    Exiting,
    After,
}

/// Animation values for one block: vertical offset (positive = down) and
/// opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseValue {
    pub offset: f64,
    pub opacity: f64,
}

fn travel(viewport_height: f64, fraction: f64) -> f64 {
    if viewport_height > 0.0 {
        viewport_height * fraction
    } else {
        UNMEASURED_TRAVEL
    }
}

/// Offset and opacity of `window` at global progress `p`.
pub fn compute_phase(p: f64, window: &PhaseWindow, viewport_height: f64) -> PhaseValue {
    let dist = travel(viewport_height, TRAVEL_FRACTION);
    let from_bottom = window.entry == EntryDirection::FromBottom;

    let start_offset = if from_bottom { dist } else { 0.0 };
    let end_offset = match (window.exit, from_bottom) {
        (ExitDirection::ToTop, _) => -dist,
        (ExitDirection::None, true) => 0.0,
        (ExitDirection::None, false) => -dist,
    };

    PhaseValue {
        offset: interpolate(&[window.start, window.end], &[start_offset, end_offset], p),
        opacity: interpolate(&[window.start, window.mid(), window.end], &[0.0, 1.0, 0.0], p),
    }
}

/// Hero title: visible at the top, fades and lifts away over the first 5%.
pub fn hero_phase(p: f64, viewport_height: f64) -> PhaseValue {
    let lift = -travel(viewport_height, HERO_TRAVEL_FRACTION);
    PhaseValue {
        offset: interpolate(&[0.0, 0.05], &[0.0, lift], p),
        opacity: interpolate(&[0.0, 0.05], &[1.0, 0.0], p),
    }
}

/// Navigation bar opacity: gone as soon as the user starts scrolling.
pub fn nav_opacity(p: f64) -> f64 {
    interpolate(&[0.0, 0.01], &[1.0, 0.0], p)
}

/// Built-in windows, one per feature block.
pub fn default_windows() -> Vec<PhaseWindow> {
    vec![
        PhaseWindow::new("stage5", 0.05, 0.15),
        PhaseWindow::new("tip", 0.20, 0.30),
        PhaseWindow::new("familiar", 0.35, 0.45),
        PhaseWindow::new("crafted", 0.50, 0.60),
        PhaseWindow::new("lightweight", 0.65, 0.75),
        PhaseWindow::new("phase-logic", 0.80, 0.90),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn opacity_peaks_at_midpoint() {
        let w = PhaseWindow::new("tip", 0.20, 0.30);
        assert!(close(compute_phase(0.20, &w, 40.0).opacity, 0.0));
        assert!(close(compute_phase(0.25, &w, 40.0).opacity, 1.0));
        assert!(close(compute_phase(0.30, &w, 40.0).opacity, 0.0));
        assert!(close(compute_phase(0.225, &w, 40.0).opacity, 0.5));
    }

    #[test]
    fn opacity_is_zero_outside_window() {
        let w = PhaseWindow::new("tip", 0.20, 0.30);
        assert_eq!(compute_phase(0.15, &w, 40.0).opacity, 0.0);
        assert_eq!(compute_phase(0.35, &w, 40.0).opacity, 0.0);
    }

    #[test]
    fn offset_travels_from_below_to_above() {
        let w = PhaseWindow::new("tip", 0.20, 0.30);
        assert!(close(compute_phase(0.10, &w, 100.0).offset, 80.0));
        assert!(close(compute_phase(0.25, &w, 100.0).offset, 0.0));
        assert!(close(compute_phase(0.40, &w, 100.0).offset, -80.0));
    }

    #[test]
    fn offset_directions_follow_flags() {
        let mut w = PhaseWindow::new("x", 0.0, 1.0);
        w.exit = ExitDirection::None;
        assert!(close(compute_phase(1.0, &w, 100.0).offset, 0.0));

        w.entry = EntryDirection::None;
        assert!(close(compute_phase(0.0, &w, 100.0).offset, 0.0));
        assert!(close(compute_phase(1.0, &w, 100.0).offset, -80.0));
    }

    #[test]
    fn unmeasured_viewport_uses_fixed_travel() {
        let w = PhaseWindow::new("tip", 0.20, 0.30);
        assert!(close(compute_phase(0.0, &w, 0.0).offset, 500.0));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let w = PhaseWindow::new("crafted", 0.50, 0.60);
        let a = compute_phase(0.537, &w, 48.0);
        let b = compute_phase(0.537, &w, 48.0);
        assert_eq!(a, b);
    }

    #[test]
    fn stage_follows_progress() {
        let w = PhaseWindow::new("tip", 0.20, 0.30);
        assert_eq!(w.stage(0.1), PhaseStage::Before);
        assert_eq!(w.stage(0.22), PhaseStage::Entering);
        assert_eq!(w.stage(w.mid()), PhaseStage::Peak);
        assert_eq!(w.stage(0.3), PhaseStage::Exiting);
        assert_eq!(w.stage(0.31), PhaseStage::After);
    }

    #[test]
    fn overlapping_windows_can_both_be_visible() {
        let a = PhaseWindow::new("a", 0.1, 0.3);
        let b = PhaseWindow::new("b", 0.15, 0.35);
        assert!(compute_phase(0.2, &a, 40.0).opacity > 0.0);
        assert!(compute_phase(0.2, &b, 40.0).opacity > 0.0);
    }

    #[test]
    fn hero_and_nav_fade_out_early() {
        assert_eq!(hero_phase(0.0, 100.0).opacity, 1.0);
        assert_eq!(hero_phase(0.05, 100.0).opacity, 0.0);
        assert!(close(hero_phase(0.05, 100.0).offset, -60.0));
        assert_eq!(nav_opacity(0.0), 1.0);
        assert_eq!(nav_opacity(0.02), 0.0);
    }

    #[test]
    fn default_windows_are_valid() {
        assert!(default_windows().iter().all(PhaseWindow::is_valid));
    }
}
