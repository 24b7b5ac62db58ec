//! User configuration: sequencer tuning, phase windows, key bindings.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-sequencer/config.toml`
//! (default `~/.config/scroll-sequencer/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::geometry::DEFAULT_PAGE_HEIGHT_MULTIPLIER;
use crate::core::matcher::DEFAULT_MAX_JUMP;
use crate::core::phase::{default_windows, EntryDirection, ExitDirection, PhaseWindow};
use crate::core::smoother::{DEFAULT_PROGRESS_SMOOTHING, DEFAULT_SCROLL_SMOOTHING};
use crate::core::spring::{DEFAULT_DAMPING, DEFAULT_STIFFNESS};
use crate::core::sync::SyncTuning;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    ScrollTop,
    ScrollBottom,
    ToggleDebug,
    ToggleProgressBar,
    ToggleMode,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::ScrollTop,
        Action::ScrollBottom,
        Action::ToggleDebug,
        Action::ToggleProgressBar,
        Action::ToggleMode,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::ScrollTop => "scroll_top",
            Action::ScrollBottom => "scroll_bottom",
            Action::ToggleDebug => "toggle_debug",
            Action::ToggleProgressBar => "toggle_progress_bar",
            Action::ToggleMode => "toggle_mode",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"↓"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Down"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Accepted range for the frame interval, from the file or `--fps`.
const MIN_FRAME_MS: u64 = 4;
const MAX_FRAME_MS: u64 = 200;

/// Everything the sequencer can be tuned with.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Largest accepted change of matched index between frames.
    pub max_jump_threshold: usize,
    /// Page height as a multiple of the viewport height.
    pub page_height_multiplier: f64,
    pub progress_smoothing: f64,
    pub scroll_smoothing: f64,
    pub spring_stiffness: f64,
    pub spring_damping: f64,
    /// Frame interval of the animation loop.
    pub frame_ms: u64,
    /// Name of the tracked scene object.
    pub object_name: String,
    /// Delay before the follow-up page re-measure after a resize.
    pub settle_delay_ms: u64,
    /// Simulated scene load time.
    pub scene_load_ms: u64,
    pub scene_max_speed: f64,
    pub scene_step_per_notch: f64,
    pub phase_windows: Vec<PhaseWindow>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            max_jump_threshold: DEFAULT_MAX_JUMP,
            page_height_multiplier: DEFAULT_PAGE_HEIGHT_MULTIPLIER,
            progress_smoothing: DEFAULT_PROGRESS_SMOOTHING,
            scroll_smoothing: DEFAULT_SCROLL_SMOOTHING,
            spring_stiffness: DEFAULT_STIFFNESS,
            spring_damping: DEFAULT_DAMPING,
            frame_ms: 16,
            object_name: "ori".into(),
            settle_delay_ms: 250,
            scene_load_ms: 600,
            scene_max_speed: 1.5,
            scene_step_per_notch: 1.0,
            phase_windows: default_windows(),
        }
    }
}

impl SequencerConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollTop, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(ScrollBottom, vec![KeyBind::new(End, n)]);
        m.insert(ToggleDebug, vec![KeyBind::new(Char('d'), n)]);
        m.insert(ToggleProgressBar, vec![KeyBind::new(Char('p'), n)]);
        m.insert(ToggleMode, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  The binding with the most
    /// modifiers wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: debug | {}: progress | {}: mode | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ToggleDebug),
            self.short_binding(Action::ToggleProgressBar),
            self.short_binding(Action::ToggleMode),
            self.short_binding(Action::Quit),
        )
    }

    /// Override the frame interval with a frame rate, kept inside the same
    /// range the config file allows.
    pub fn set_fps(&mut self, fps: u32) {
        let frame_ms = 1000 / u64::from(fps.max(1));
        self.frame_ms = frame_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS);
    }

    pub fn tuning(&self) -> SyncTuning {
        SyncTuning {
            max_jump: self.max_jump_threshold,
            page_height_multiplier: self.page_height_multiplier,
            progress_smoothing: self.progress_smoothing,
            scroll_smoothing: self.scroll_smoothing,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Write the current config to disk and return where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();
        let mut custom_windows: Vec<PhaseWindow> = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(label) = key.strip_prefix("phase.") {
                match parse_window(label, value) {
                    Some(w) => custom_windows.push(w),
                    None => tracing::warn!(label, value, "ignoring invalid phase window"),
                }
                continue;
            }

            match key {
                "max_jump_threshold" => {
                    if let Ok(v) = value.parse::<usize>() {
                        cfg.max_jump_threshold = v.max(1);
                    }
                }
                "page_height_multiplier" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.page_height_multiplier = v.max(1.0);
                    }
                }
                "progress_smoothing" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.progress_smoothing = clamp_factor(v);
                    }
                }
                "scroll_smoothing" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.scroll_smoothing = clamp_factor(v);
                    }
                }
                "spring_stiffness" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.spring_stiffness = v.max(0.0);
                    }
                }
                "spring_damping" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.spring_damping = v.max(0.0);
                    }
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        cfg.frame_ms = v.clamp(MIN_FRAME_MS, MAX_FRAME_MS);
                    }
                }
                "object_name" => {
                    if !value.is_empty() {
                        cfg.object_name = value.to_string();
                    }
                }
                "settle_delay_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        cfg.settle_delay_ms = v.min(5000);
                    }
                }
                "scene_load_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        cfg.scene_load_ms = v.min(10_000);
                    }
                }
                "scene_max_speed" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.scene_max_speed = v.max(0.01);
                    }
                }
                "scene_step_per_notch" => {
                    if let Some(v) = parse_f64(value) {
                        cfg.scene_step_per_notch = v.max(0.0);
                    }
                }
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if !parsed.is_empty() {
                        cfg.bindings.insert(action, parsed);
                    }
                }
            }
        }

        if !custom_windows.is_empty() {
            cfg.phase_windows = custom_windows;
        }
        cfg
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# scroll-sequencer configuration".to_string(),
            String::new(),
            "# Sequencer".to_string(),
            format!("max_jump_threshold = {}", self.max_jump_threshold),
            format!("page_height_multiplier = {}", self.page_height_multiplier),
            format!("progress_smoothing = {}", self.progress_smoothing),
            format!("scroll_smoothing = {}", self.scroll_smoothing),
            format!("spring_stiffness = {}", self.spring_stiffness),
            format!("spring_damping = {}", self.spring_damping),
            format!("frame_ms = {}", self.frame_ms),
            format!("object_name = {}", self.object_name),
            format!("settle_delay_ms = {}", self.settle_delay_ms),
            String::new(),
            "# Simulated scene".to_string(),
            format!("scene_load_ms = {}", self.scene_load_ms),
            format!("scene_max_speed = {}", self.scene_max_speed),
            format!("scene_step_per_notch = {}", self.scene_step_per_notch),
            String::new(),
            "# Phase windows".to_string(),
            "# Format: phase.<label> = start, end[, from_bottom][, to_top]".to_string(),
        ];

        for w in &self.phase_windows {
            let mut value = format!("{}, {}", w.start, w.end);
            if w.entry == EntryDirection::FromBottom {
                value.push_str(", from_bottom");
            }
            if w.exit == ExitDirection::ToTop {
                value.push_str(", to_top");
            }
            lines.push(format!("phase.{} = {}", w.label, value));
        }

        lines.push(String::new());
        lines.push("# Key bindings".to_string());
        lines.push("# Format: action = Key1, Key2, ...".to_string());
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_f64(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn clamp_factor(v: f64) -> f64 {
    v.clamp(0.001, 1.0)
}

/// Parse `start, end[, from_bottom][, to_top]`.  Flags that are absent mean
/// "no movement" on that side.
fn parse_window(label: &str, value: &str) -> Option<PhaseWindow> {
    let mut parts = value.split(',').map(str::trim);
    let start = parse_f64(parts.next()?)?;
    let end = parse_f64(parts.next()?)?;
    let mut window = PhaseWindow::new(label, start, end);
    window.entry = EntryDirection::None;
    window.exit = ExitDirection::None;
    for flag in parts {
        match flag {
            "from_bottom" => window.entry = EntryDirection::FromBottom,
            "to_top" => window.exit = ExitDirection::ToTop,
            _ => return None,
        }
    }
    (!label.is_empty() && window.is_valid()).then_some(window)
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-sequencer/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-sequencer").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn fps_override_is_clamped_like_the_file_value() {
        let mut cfg = SequencerConfig::default();
        cfg.set_fps(60);
        assert_eq!(cfg.frame_ms, 16);
        cfg.set_fps(1000);
        assert_eq!(cfg.frame_ms, 4);
        cfg.set_fps(1);
        assert_eq!(cfg.frame_ms, 200);
        cfg.set_fps(0);
        assert_eq!(cfg.frame_ms, 200);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = SequencerConfig::parse("");
        assert_eq!(cfg.max_jump_threshold, 5);
        assert_eq!(cfg.page_height_multiplier, 50.0);
        assert_eq!(cfg.progress_smoothing, 0.15);
        assert_eq!(cfg.scroll_smoothing, 0.10);
        assert_eq!(cfg.phase_windows.len(), 6);
    }

    #[test]
    fn values_are_parsed_and_clamped() {
        let cfg = SequencerConfig::parse(
            "[sequencer]\nmax_jump_threshold = 0\nprogress_smoothing = 3\nscroll_smoothing = nope\nobject_name = \"camera\"\n",
        );
        assert_eq!(cfg.max_jump_threshold, 1);
        assert_eq!(cfg.progress_smoothing, 1.0);
        assert_eq!(cfg.scroll_smoothing, 0.10);
        assert_eq!(cfg.object_name, "camera");
    }

    #[test]
    fn phase_windows_replace_defaults() {
        let cfg = SequencerConfig::parse(
            "phase.intro = 0.1, 0.2, from_bottom\nphase.bad = 0.5, 0.4\nphase.outro = 0.7, 0.9, to_top\n",
        );
        assert_eq!(cfg.phase_windows.len(), 2);
        let intro = &cfg.phase_windows[0];
        assert_eq!(intro.label, "intro");
        assert_eq!(intro.entry, EntryDirection::FromBottom);
        assert_eq!(intro.exit, ExitDirection::None);
        assert_eq!(cfg.phase_windows[1].exit, ExitDirection::ToTop);
    }

    #[test]
    fn bindings_override_and_match() {
        let cfg = SequencerConfig::parse("quit = x\nscroll_down = Ctrl+n, PageDown\n");
        assert_eq!(cfg.match_key(key(KeyCode::Char('x'))), Some(Action::Quit));
        assert_eq!(cfg.match_key(key(KeyCode::Char('q'))), None);
        assert_eq!(cfg.match_key(key(KeyCode::PageDown)), Some(Action::ScrollDown));
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(cfg.match_key(ctrl_n), Some(Action::ScrollDown));
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut original = SequencerConfig::default();
        original.max_jump_threshold = 7;
        original.phase_windows[0].exit = ExitDirection::None;
        let reparsed = SequencerConfig::parse(&original.serialise());
        assert_eq!(reparsed.max_jump_threshold, 7);
        assert_eq!(reparsed.phase_windows, original.phase_windows);
        assert_eq!(reparsed.bindings, original.bindings);
    }
}
