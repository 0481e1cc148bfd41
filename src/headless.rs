//! Headless platform: replays a script against an offscreen Cairo surface.

use crate::config::Config;
use crate::draw::Canvas;
use crate::failsafe::{FailsafeSupervisor, FaultRecord};
use crate::input::ToolState;
use crate::replay::{InputScript, spawn_feeder};
use crate::scheduler::{self, SessionClock, StopReason};
use crate::ui::{IndicatorBadge, render_frame};
use anyhow::{Context, Result, anyhow};
use log::info;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// State of a finished headless session plus its last frame.
pub struct HeadlessOutcome {
    pub frame: cairo::ImageSurface,
    pub state: ToolState,
    /// Finalized strokes still registered
    pub strokes: usize,
    /// Objects left on the canvas
    pub objects: usize,
    pub fault: Option<FaultRecord>,
    pub ticks: u64,
    pub reason: StopReason,
}

impl HeadlessOutcome {
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.frame
            .write_to_png(&mut file)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
        info!("Wrote final frame to {}", path.display());
        Ok(())
    }
}

/// Replays `script` in real time and renders the final frame at `size`.
///
/// `stop_flag` ends the session early when raised (e.g. by a signal).
pub fn run_replay(
    config: &Config,
    script: &InputScript,
    size: (u32, u32),
    stop_flag: Arc<AtomicBool>,
) -> Result<HeadlessOutcome> {
    let events = script.timed_events()?;
    let (width, height) = size;
    let width = i32::try_from(width).context("Surface width out of range")?;
    let height = i32::try_from(height).context("Surface height out of range")?;

    let canvas = Canvas::new(config.drawing.background_color.to_color());
    let supervisor = FailsafeSupervisor::new(config.surface_settings(), canvas, IndicatorBadge::new());

    let (sender, channel) = calloop::channel::channel();
    let clock = SessionClock::start();
    info!(
        "Replaying {} event(s) over {:?} on a {}x{} surface",
        events.len(),
        script.duration(),
        width,
        height
    );
    spawn_feeder(events, sender, clock, stop_flag.clone())?;

    let summary = scheduler::run(
        supervisor,
        channel,
        clock,
        config.tick_interval(),
        stop_flag,
    )?;
    let supervisor = summary.supervisor;

    let frame = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .context("Failed to create frame surface")?;
    {
        let ctx = cairo::Context::new(&frame).context("Failed to create cairo context")?;
        render_frame(
            &ctx,
            supervisor.renderer(),
            supervisor.state(),
            supervisor.pointer(),
            supervisor.indicator(),
            &config.pointer_ink(),
            &config.overlay_style(),
        )
        .map_err(|e| anyhow!("Failed to render final frame: {}", e))?;
    }
    frame.flush();

    Ok(HeadlessOutcome {
        state: supervisor.state(),
        strokes: supervisor.registry().len(),
        objects: supervisor.renderer().len(),
        fault: supervisor.fault().cloned(),
        ticks: summary.ticks,
        reason: summary.reason,
        frame,
    })
}
