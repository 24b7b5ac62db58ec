//! Terminal event abstraction and the frame clock.
//!
//! A background task polls crossterm and forwards input over a channel.  It
//! also emits [`AppEvent::Tick`] at a fixed frame rate, even while input is
//! arriving, so the animation loop never stalls behind a burst of events.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One animation frame elapsed.
    Tick,
}

/// Spawns the event reader.  Dropping the receiver stops the task, which is
/// also how the resize listener is torn down.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut next_tick = Instant::now() + frame_interval;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                // Skip missed frames rather than bursting to catch up.
                next_tick = now + frame_interval;
            }
        }
    });

    rx
}
