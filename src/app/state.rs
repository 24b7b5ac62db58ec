//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and every event handler takes `&mut AppState`.

use std::time::Instant;

use clap::ValueEnum;

use crate::config::SequencerConfig;
use crate::core::{
    geometry::PageGeometry,
    path::{Waypoint, WaypointPath},
    sampler::PositionSampler,
    skip::SkipReason,
    spring::SpringValue,
    sync::SyncEngine,
};
use crate::scene::simulated::SimulatedScene;

/// How scroll input reaches the text animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SyncMode {
    /// Scroll drives the scene; the object's position drives the page.
    #[default]
    Tracked,
    /// Scroll moves the page directly; the scene is not consulted.
    ScrollOnly,
}

impl SyncMode {
    pub fn label(self) -> &'static str {
        match self {
            SyncMode::Tracked => "tracked",
            SyncMode::ScrollOnly => "scroll-only",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SyncMode::Tracked => SyncMode::ScrollOnly,
            SyncMode::ScrollOnly => SyncMode::Tracked,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    pub config: SequencerConfig,
    pub mode: SyncMode,
    /// Matcher + smoothing state + page geometry.
    pub engine: SyncEngine,
    pub sampler: PositionSampler,
    /// `None` until the scene has finished loading.
    pub scene: Option<SimulatedScene>,
    /// Current page scroll position, in rows.
    pub scroll_offset: f64,
    /// Spring-smoothed scroll progress feeding the text animations.
    pub sprung_progress: SpringValue,
    /// Most recent live object position (shown in the debug overlay).
    pub last_position: Option<Waypoint>,
    /// Why the most recent frame did not advance, if it didn't.
    pub last_skip: Option<SkipReason>,
    /// Measured page height in rows, kept for the delayed re-measure.
    pub viewport_height: f64,
    /// When set, re-measure the page once this instant has passed.
    pub pending_settle: Option<Instant>,
    pub last_frame: Instant,
    /// Monotonic frame counter (drives the loading spinner).
    pub tick: u64,
    pub show_debug: bool,
    pub show_progress_bar: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: SequencerConfig, path: WaypointPath, mode: SyncMode) -> Self {
        let sprung_progress = SpringValue::new(config.spring_stiffness, config.spring_damping);
        Self {
            engine: SyncEngine::new(path, config.tuning()),
            sampler: PositionSampler::new(config.object_name.clone()),
            config,
            mode,
            scene: None,
            scroll_offset: 0.0,
            sprung_progress,
            last_position: None,
            last_skip: None,
            viewport_height: 0.0,
            pending_settle: None,
            last_frame: Instant::now(),
            tick: 0,
            show_debug: false,
            show_progress_bar: true,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.engine.geometry()
    }

    /// Raw scroll progress of the page in [0, 1].
    pub fn scroll_progress(&self) -> f64 {
        self.geometry().scroll_progress(self.scroll_offset)
    }

    /// Progress the text animations are evaluated at.
    pub fn phase_progress(&self) -> f64 {
        self.sprung_progress.value()
    }

    /// Value shown by the progress bar.  In scroll-only mode nothing is
    /// matched, so the bar follows the page directly.
    pub fn readout_progress(&self) -> f64 {
        match self.mode {
            SyncMode::Tracked => self.engine.progress(),
            SyncMode::ScrollOnly => self.scroll_progress(),
        }
    }

    pub fn scene_loaded(&self) -> bool {
        self.scene.is_some()
    }
}
