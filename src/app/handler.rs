//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::state::{AppState, SyncMode};
use crate::config::Action;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::ScrollDown => scroll_by(state, 1.0),
        Action::ScrollUp => scroll_by(state, -1.0),
        Action::ScrollTop => jump_to_edge(state, false),
        Action::ScrollBottom => jump_to_edge(state, true),
        Action::ToggleDebug => state.show_debug = !state.show_debug,
        Action::ToggleProgressBar => state.show_progress_bar = !state.show_progress_bar,
        Action::ToggleMode => {
            state.mode = state.mode.toggled();
            state.last_skip = None;
            if state.mode == SyncMode::Tracked {
                resync_tracking(state);
            }
            state.status_message = Some(format!("Mode: {}", state.mode.label()));
            tracing::info!(mode = state.mode.label(), "sync mode changed");
        }
        Action::Quit => state.should_quit = true,
    }
}

/// Pick up tracking from wherever scroll-only mode left the page: the engine
/// and the scene both restart at the current offset.
fn resync_tracking(state: &mut AppState) {
    let position = state.engine.resync_scroll(state.scroll_offset);
    if let Some(scene) = state.scene.as_mut() {
        scene.place(position);
    }
    tracing::debug!(position, "tracking resynced to page offset");
}

/// Process a mouse event.  Only the wheel matters.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_by(state, 1.0),
        MouseEventKind::ScrollUp => scroll_by(state, -1.0),
        _ => {}
    }
}

/// Rows of page travel that correspond to one scroll notch, so both modes
/// advance roughly one waypoint per notch.
fn rows_per_notch(state: &AppState) -> f64 {
    let path_steps = state.engine.path().last_index() as f64;
    state.geometry().max_scroll_offset() / path_steps * state.config.scene_step_per_notch
}

fn scroll_by(state: &mut AppState, notches: f64) {
    match state.mode {
        SyncMode::Tracked => {
            // Before the scene loads there is nothing to scroll.
            if let Some(scene) = state.scene.as_mut() {
                scene.on_scroll(notches);
            }
        }
        SyncMode::ScrollOnly => {
            let target = state.scroll_offset + notches * rows_per_notch(state);
            state.scroll_offset = state.geometry().clamp_offset(target);
        }
    }
}

fn jump_to_edge(state: &mut AppState, to_end: bool) {
    match state.mode {
        SyncMode::Tracked => {
            if let Some(scene) = state.scene.as_mut() {
                if to_end {
                    scene.seek_end();
                } else {
                    scene.seek_start();
                }
            }
        }
        SyncMode::ScrollOnly => {
            let geometry = state.geometry();
            state.scroll_offset = if to_end {
                geometry.max_scroll_offset()
            } else {
                0.0
            };
        }
    }
}
