//! Scroll-sync engine: one explicit state object driven once per frame.
//!
//! The engine owns the matcher state (last accepted index), the smoothing
//! state and the current page geometry.  [`SyncEngine::step`] is pure with
//! respect to the outside world: it takes the frame's position sample and
//! returns what the host should publish and where it should scroll to.

use super::geometry::{PageGeometry, PageHeightController};
use super::matcher::IndexMatcher;
use super::path::{Waypoint, WaypointPath};
use super::skip::SkipReason;
use super::smoother::ProgressSmoother;

/// Tunables for the engine.  See `config::SequencerConfig` for defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncTuning {
    pub max_jump: usize,
    pub page_height_multiplier: f64,
    pub progress_smoothing: f64,
    pub scroll_smoothing: f64,
}

/// Everything an accepted frame produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub index: usize,
    pub position: Waypoint,
    pub target_progress: f64,
    /// Smoothed progress readout.
    pub progress: f64,
    /// Absolute scroll offset the host must apply.
    pub scroll_to: f64,
}

#[derive(Debug, Clone)]
pub struct SyncEngine {
    matcher: IndexMatcher,
    smoother: ProgressSmoother,
    page: PageHeightController,
    geometry: PageGeometry,
}

impl SyncEngine {
    pub fn new(path: WaypointPath, tuning: SyncTuning) -> Self {
        Self {
            matcher: IndexMatcher::new(path, tuning.max_jump),
            smoother: ProgressSmoother::new(tuning.progress_smoothing, tuning.scroll_smoothing),
            page: PageHeightController::new(tuning.page_height_multiplier),
            geometry: PageGeometry::default(),
        }
    }

    /// Re-measure the page for a new viewport height.  The scroll-to-progress
    /// mapping just changed, so smoothed progress starts over from zero.
    pub fn initialize_page(&mut self, viewport_height: f64) -> PageGeometry {
        self.geometry = self.page.layout(viewport_height);
        self.smoother.reset_progress();
        self.geometry
    }

    /// Process one frame's sample.
    ///
    /// On any skip the engine state is left exactly as it was; the caller
    /// simply tries again next frame.
    pub fn step(&mut self, sample: Result<Waypoint, SkipReason>) -> Result<FrameUpdate, SkipReason> {
        let position = sample?;
        let index = self.matcher.match_position(&position)?;
        let target_progress = self.matcher.path().progress_at(index);
        let smoothed = self
            .smoother
            .step(target_progress, self.geometry.max_scroll_offset());

        Ok(FrameUpdate {
            index,
            position,
            target_progress,
            progress: smoothed.progress,
            scroll_to: smoothed.scroll_offset,
        })
    }

    /// Adopt a scroll offset set from outside the loop.  Progress, scroll
    /// smoothing and the matcher's last index all restart from `offset`, so
    /// the next accepted frame continues from there.  Returns the fractional
    /// path position matching the offset.
    pub fn resync_scroll(&mut self, offset: f64) -> f64 {
        let offset = self.geometry.clamp_offset(offset);
        let progress = self.geometry.scroll_progress(offset);
        let position = progress * self.path().last_index() as f64;
        self.smoother.seed(progress, offset);
        self.matcher.set_last_index(position.round() as usize);
        position
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn progress(&self) -> f64 {
        self.smoother.progress()
    }

    pub fn last_index(&self) -> usize {
        self.matcher.last_index()
    }

    pub fn path(&self) -> &WaypointPath {
        self.matcher.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::REFERENCE_WAYPOINTS;

    fn tuning() -> SyncTuning {
        SyncTuning {
            max_jump: 5,
            page_height_multiplier: 50.0,
            progress_smoothing: 0.15,
            scroll_smoothing: 0.10,
        }
    }

    fn engine() -> SyncEngine {
        let mut e = SyncEngine::new(WaypointPath::reference(), tuning());
        e.initialize_page(40.0);
        e
    }

    #[test]
    fn position_on_waypoint_ten_advances_progress() {
        let mut e = engine();
        let update = e.step(Ok(REFERENCE_WAYPOINTS[10])).unwrap();
        assert_eq!(update.index, 10);
        assert!((update.target_progress - 10.0 / 85.0).abs() < 1e-12);
        assert!((update.progress - 0.0176).abs() < 1e-4);
        let max_scroll = e.geometry().max_scroll_offset();
        assert!((update.scroll_to - max_scroll * (10.0 / 85.0) * 0.10).abs() < 1e-9);
    }

    #[test]
    fn unavailable_sample_changes_nothing() {
        let mut e = engine();
        e.step(Ok(REFERENCE_WAYPOINTS[2])).unwrap();
        let before = (e.progress(), e.last_index());
        assert_eq!(
            e.step(Err(SkipReason::ProviderUnavailable)),
            Err(SkipReason::ProviderUnavailable)
        );
        assert_eq!((e.progress(), e.last_index()), before);
    }

    #[test]
    fn rejected_jump_keeps_smoothing_state() {
        let mut e = engine();
        e.step(Ok(REFERENCE_WAYPOINTS[40])).unwrap();
        let before = e.progress();
        let err = e.step(Ok(REFERENCE_WAYPOINTS[50])).unwrap_err();
        assert!(matches!(err, SkipReason::JumpRejected { delta: 10, .. }));
        assert_eq!(e.progress(), before);
        assert_eq!(e.last_index(), 40);
    }

    #[test]
    fn reinitializing_resets_progress() {
        let mut e = engine();
        for _ in 0..10 {
            e.step(Ok(REFERENCE_WAYPOINTS[3])).unwrap();
        }
        assert!(e.progress() > 0.0);
        e.initialize_page(40.0);
        e.initialize_page(60.0);
        assert_eq!(e.progress(), 0.0);
        assert_eq!(e.geometry().total_page_height, 3000.0);
    }

    #[test]
    fn resync_continues_from_an_external_offset() {
        let mut e = engine();
        e.step(Ok(REFERENCE_WAYPOINTS[3])).unwrap();
        let max_scroll = e.geometry().max_scroll_offset();
        let position = e.resync_scroll(max_scroll);
        assert_eq!(position, 85.0);
        assert_eq!(e.last_index(), 85);
        assert_eq!(e.progress(), 1.0);
        let update = e.step(Ok(REFERENCE_WAYPOINTS[85])).unwrap();
        assert_eq!(update.scroll_to, max_scroll);
    }

    #[test]
    fn walking_the_path_converges_to_the_end() {
        let mut e = engine();
        for wp in REFERENCE_WAYPOINTS.iter() {
            e.step(Ok(*wp)).unwrap();
        }
        for _ in 0..200 {
            e.step(Ok(REFERENCE_WAYPOINTS[85])).unwrap();
        }
        assert_eq!(e.last_index(), 85);
        assert!((e.progress() - 1.0).abs() < 1e-6);
    }
}
