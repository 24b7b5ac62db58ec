//! Per-frame work: scene animation, the scroll-sync step, and the sprung
//! scroll progress that feeds the text animations.

use std::time::{Duration, Instant};

use super::state::{AppState, SyncMode};
use crate::core::skip::SkipReason;

/// Re-measure the page for a viewport of `viewport_height` rows.
pub fn reinitialize_page(state: &mut AppState, viewport_height: f64) {
    state.viewport_height = viewport_height;
    let geometry = state.engine.initialize_page(viewport_height);
    state.scroll_offset = geometry.clamp_offset(state.scroll_offset);
    tracing::info!(
        viewport = geometry.viewport_height,
        height = geometry.total_page_height,
        "page height initialized"
    );
}

/// Measure now and schedule one follow-up measure after the settle delay.
pub fn handle_resize(state: &mut AppState, viewport_height: f64, now: Instant) {
    reinitialize_page(state, viewport_height);
    state.pending_settle = Some(now + Duration::from_millis(state.config.settle_delay_ms));
}

/// Run one animation frame.
pub fn on_tick(state: &mut AppState, now: Instant) {
    let dt = now.saturating_duration_since(state.last_frame).as_secs_f64();
    state.last_frame = now;
    state.tick = state.tick.wrapping_add(1);

    if state.pending_settle.is_some_and(|at| now >= at) {
        state.pending_settle = None;
        let viewport_height = state.viewport_height;
        reinitialize_page(state, viewport_height);
    }

    if let Some(scene) = state.scene.as_mut() {
        scene.advance();
    }

    if state.mode == SyncMode::Tracked {
        sync_step(state);
    }

    let target = state.scroll_progress();
    state.sprung_progress.set_target(target);
    if !state.sprung_progress.is_at_rest() {
        state.sprung_progress.tick(dt);
    }
}

/// Sample → match → smooth → write back the scroll position.
fn sync_step(state: &mut AppState) {
    let sample = state.sampler.sample(state.scene.as_ref());
    if let Ok(pos) = sample {
        state.last_position = Some(pos);
    }

    match state.engine.step(sample) {
        Ok(update) => {
            tracing::trace!(
                index = update.index,
                target = update.target_progress,
                progress = update.progress,
                position = ?update.position,
                "frame synced"
            );
            state.scroll_offset = state.geometry().clamp_offset(update.scroll_to);
            state.last_skip = None;
        }
        Err(reason) => {
            match &reason {
                SkipReason::ProviderUnavailable | SkipReason::ObjectNotFound { .. } => {
                    tracing::trace!(%reason, "frame skipped");
                }
                SkipReason::JumpRejected {
                    candidate,
                    last,
                    delta,
                } => {
                    tracing::debug!(candidate, last, delta, "jump rejected");
                }
            }
            state.last_skip = Some(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SequencerConfig;
    use crate::core::path::WaypointPath;
    use crate::scene::simulated::SimulatedScene;

    fn state(mode: SyncMode) -> AppState {
        let mut s = AppState::new(SequencerConfig::default(), WaypointPath::reference(), mode);
        reinitialize_page(&mut s, 40.0);
        s
    }

    fn loaded(mode: SyncMode) -> AppState {
        let mut s = state(mode);
        s.scene = Some(SimulatedScene::new(s.engine.path().clone(), "ori", 1.5, 1.0));
        s
    }

    fn frames(s: &mut AppState, n: usize) {
        for _ in 0..n {
            let now = s.last_frame + Duration::from_millis(16);
            on_tick(s, now);
        }
    }

    #[test]
    fn unloaded_scene_skips_without_touching_progress() {
        let mut s = state(SyncMode::Tracked);
        frames(&mut s, 5);
        assert_eq!(s.last_skip, Some(SkipReason::ProviderUnavailable));
        assert_eq!(s.engine.progress(), 0.0);
        assert_eq!(s.scroll_offset, 0.0);
    }

    #[test]
    fn scene_travel_drives_scroll_position() {
        let mut s = loaded(SyncMode::Tracked);
        if let Some(scene) = s.scene.as_mut() {
            scene.seek(20.0);
        }
        frames(&mut s, 300);
        assert_eq!(s.engine.last_index(), 20);
        let expected = s.geometry().max_scroll_offset() * 20.0 / 85.0;
        assert!((s.scroll_offset - expected).abs() < 1.0);
        assert!((s.phase_progress() - 20.0 / 85.0).abs() < 0.01);
    }

    #[test]
    fn scroll_only_mode_ignores_the_scene() {
        let mut s = loaded(SyncMode::ScrollOnly);
        s.scroll_offset = 500.0;
        frames(&mut s, 10);
        assert_eq!(s.scroll_offset, 500.0);
        assert_eq!(s.engine.last_index(), 0);
    }

    #[test]
    fn returning_to_tracked_mode_keeps_the_page_in_place() {
        use crate::app::handler::handle_key;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let mut s = loaded(SyncMode::Tracked);
        handle_key(&mut s, press(KeyCode::Char('m')));
        handle_key(&mut s, press(KeyCode::End));
        let bottom = s.geometry().max_scroll_offset();
        assert_eq!(s.scroll_offset, bottom);

        handle_key(&mut s, press(KeyCode::Char('m')));
        assert_eq!(s.mode, SyncMode::Tracked);
        frames(&mut s, 1);
        assert!((s.scroll_offset - bottom).abs() < 1e-9);
        assert_eq!(s.engine.last_index(), 85);
        assert_eq!(s.last_skip, None);

        frames(&mut s, 60);
        assert!((s.scroll_offset - bottom).abs() < 1e-9);
    }

    #[test]
    fn settle_timer_remeasures_once() {
        let mut s = state(SyncMode::Tracked);
        let now = s.last_frame;
        handle_resize(&mut s, 30.0, now);
        assert!(s.pending_settle.is_some());
        frames(&mut s, 30);
        assert!(s.pending_settle.is_none());
        assert_eq!(s.geometry().total_page_height, 1500.0);
    }
}
