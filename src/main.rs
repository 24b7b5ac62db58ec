//! Scroll-synchronised text sequencer for the terminal.
//!
//! Scrolling drives a 3D object along a waypoint path; the object's position
//! is matched back to the path and drives which feature text is on screen.
//! Run with `--mode scroll-only` to skip the object and map scroll directly.

mod app;
mod config;
mod core;
mod scene;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame, handler,
    scene_runtime::{spawn_scene_load, SceneUpdate},
    state::{AppState, SyncMode},
};
use crate::config::SequencerConfig;
use crate::core::path::WaypointPath;
use crate::scene::simulated::SimulatedScene;
use crate::ui::{
    layout::AppLayout,
    page::{NavBar, PageWidget},
    progress::{DebugOverlay, ProgressBar},
    spinner::LoadingIndicator,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-synchronised text sequencer")]
struct Cli {
    /// How scroll input drives the page.
    #[arg(long, value_enum, default_value_t = SyncMode::Tracked)]
    mode: SyncMode,

    /// Start with the debug overlay visible.
    #[arg(long)]
    debug: bool,

    /// Waypoint file (`x, y, z` per line).  Defaults to the built-in path.
    #[arg(long, value_name = "FILE")]
    waypoints: Option<PathBuf>,

    /// Frame rate of the animation loop (overrides `frame_ms`).
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the default configuration file and exit.
    #[arg(long = "init-config")]
    init_config: bool,
}

// ───────────────────────────────────────── logging ───────────

/// Logs go to `--log-file` when given.  Otherwise they only go to stderr
/// when `RUST_LOG` is set, since stderr also carries the TUI.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = SequencerConfig::load();
    if let Some(fps) = cli.fps {
        config.set_fps(fps);
    }

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    if cli.init_config {
        let path = SequencerConfig::default().save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let path = match &cli.waypoints {
        Some(file) => WaypointPath::load(file)?,
        None => WaypointPath::reference(),
    };
    tracing::info!(waypoints = path.len(), mode = cli.mode.label(), "starting");

    let scene = SimulatedScene::new(
        path.clone(),
        config.object_name.clone(),
        config.scene_max_speed,
        config.scene_step_per_notch,
    );
    let frame_interval = Duration::from_millis(config.frame_ms);
    let scene_delay = Duration::from_millis(config.scene_load_ms);

    let mut state = AppState::new(config, path, cli.mode);
    state.show_debug = cli.debug;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // Startup is measured like a resize so it also gets the settle re-measure.
    let size = terminal.size()?;
    frame::handle_resize(
        &mut state,
        AppLayout::viewport_height(size.width, size.height),
        Instant::now(),
    );

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(frame_interval);
    let (scene_tx, mut scene_rx) = tokio::sync::mpsc::unbounded_channel::<SceneUpdate>();
    spawn_scene_load(scene_tx, scene, scene_delay);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|f| {
            let layout = AppLayout::from_area(f.area());
            let progress = state.phase_progress();

            f.render_widget(NavBar { progress }, layout.nav_area);
            f.render_widget(
                PageWidget {
                    windows: &state.config.phase_windows,
                    progress,
                    viewport_height: state.viewport_height,
                },
                layout.page_area,
            );
            f.render_widget(
                LoadingIndicator {
                    visible: state.mode == SyncMode::Tracked && !state.scene_loaded(),
                    tick: state.tick,
                },
                layout.page_area,
            );

            if state.show_debug {
                f.render_widget(
                    DebugOverlay {
                        position: state.last_position,
                        last_index: state.engine.last_index(),
                        waypoint_count: state.engine.path().len(),
                        progress: state.readout_progress(),
                        mode: state.mode,
                        last_skip: state.last_skip.as_ref(),
                        scene_timeline: state.scene.as_ref().map(|s| s.timeline()),
                    },
                    layout.page_area,
                );
            }

            if state.show_progress_bar {
                f.render_widget(
                    ProgressBar {
                        progress: state.readout_progress(),
                    },
                    layout.progress_area,
                );
            }

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            f.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        frame::handle_resize(&mut state, AppLayout::viewport_height(w, h), Instant::now());
                    }
                    AppEvent::Tick => frame::on_tick(&mut state, Instant::now()),
                }
            }

            Some(update) = scene_rx.recv() => {
                match update {
                    SceneUpdate::Loaded(scene) => {
                        tracing::info!("scene loaded");
                        state.scene = Some(scene);
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    // Dropping the event receiver stops the reader task.
    drop(events);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
