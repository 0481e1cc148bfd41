//! Scripted input for the headless surface.
//!
//! A replay script is a TOML list of timed pointer events:
//!
//! ```toml
//! [[event]]
//! at_ms = 0
//! kind = "press"
//! button = "right"
//! x = 100
//! y = 100
//!
//! [[event]]
//! at_ms = 40
//! kind = "release"
//! button = "right"
//!
//! [[event]]
//! at_ms = 60
//! kind = "move"
//! x = 140
//! y = 120
//! ```
//!
//! Press and release events without coordinates happen at the last known
//! pointer position. Events are fed from a background thread in real time
//! and carry their scripted `at_ms` as timestamp.

use crate::draw::Point;
use crate::input::{InputEvent, MouseButton, PointerEvent};
use crate::scheduler::SessionClock;
use anyhow::{Context, Result, bail};
use calloop::channel::Sender;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Longest single sleep of the feeder, so a stop request is noticed quickly.
const FEEDER_SLEEP_SLICE: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEventKind {
    Press,
    Release,
    Move,
    Exit,
}

/// One `[[event]]` entry as written in the script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptEvent {
    /// Milliseconds since session start
    pub at_ms: u64,
    pub kind: ScriptEventKind,
    #[serde(default)]
    pub button: Option<MouseButton>,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputScript {
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

/// Input event with its scheduled delivery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    pub at: Duration,
    pub event: InputEvent,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        let script = Self::parse(&text)
            .with_context(|| format!("Invalid replay script {}", path.display()))?;
        info!(
            "Loaded replay script {} ({} events)",
            path.display(),
            script.events.len()
        );
        Ok(script)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let script: InputScript = toml::from_str(text).context("Failed to parse replay TOML")?;
        Ok(script)
    }

    /// Time of the last scripted event.
    pub fn duration(&self) -> Duration {
        self.events
            .last()
            .map(|event| Duration::from_millis(event.at_ms))
            .unwrap_or_default()
    }

    /// Resolves the script into timed input events.
    ///
    /// Fails on events out of time order, button events without a button and
    /// moves without both coordinates.
    pub fn timed_events(&self) -> Result<Vec<TimedEvent>> {
        let mut pointer = Point::default();
        let mut previous_at = 0;
        let mut timed = Vec::with_capacity(self.events.len());

        for (index, entry) in self.events.iter().enumerate() {
            let number = index + 1;
            if entry.at_ms < previous_at {
                bail!(
                    "event {} at {}ms is earlier than the previous event at {}ms",
                    number,
                    entry.at_ms,
                    previous_at
                );
            }
            previous_at = entry.at_ms;
            let at = Duration::from_millis(entry.at_ms);

            let event = match entry.kind {
                ScriptEventKind::Move => {
                    let (Some(x), Some(y)) = (entry.x, entry.y) else {
                        bail!("event {}: move needs both x and y", number);
                    };
                    pointer = Point::new(x, y);
                    InputEvent::Motion(pointer)
                }
                ScriptEventKind::Press | ScriptEventKind::Release => {
                    let Some(button) = entry.button else {
                        bail!("event {}: {:?} needs a button", number, entry.kind);
                    };
                    pointer = Point::new(entry.x.unwrap_or(pointer.x), entry.y.unwrap_or(pointer.y));
                    if entry.kind == ScriptEventKind::Press {
                        InputEvent::Button(PointerEvent::press(button, pointer, at))
                    } else {
                        InputEvent::Button(PointerEvent::release(button, pointer, at))
                    }
                }
                ScriptEventKind::Exit => InputEvent::Exit,
            };
            timed.push(TimedEvent { at, event });
        }

        Ok(timed)
    }
}

/// Feeds `events` into `sender` on a background thread, each at its time.
///
/// The thread ends early when `stop` is raised or the event loop holding the
/// receiving side has shut down; in the latter case it raises `stop` itself.
/// Dropping the sender at the end closes the channel.
pub fn spawn_feeder(
    events: Vec<TimedEvent>,
    sender: Sender<InputEvent>,
    clock: SessionClock,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("replay-feeder".into())
        .spawn(move || {
            for timed in events {
                loop {
                    if stop.load(Ordering::SeqCst) {
                        debug!("Replay feeder stopped early");
                        return;
                    }
                    let now = clock.now();
                    if now >= timed.at {
                        break;
                    }
                    thread::sleep((timed.at - now).min(FEEDER_SLEEP_SLICE));
                }

                if sender.send(timed.event).is_err() {
                    info!("Input no longer accepted, ending replay");
                    stop.store(true, Ordering::SeqCst);
                    return;
                }
            }
            debug!("Replay script exhausted");
        })
        .context("Failed to spawn replay feeder thread")?;
    Ok(handle)
}
