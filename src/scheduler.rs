//! Fixed-rate tick scheduler built on calloop.
//!
//! One event loop drives both sources on a single thread: a repeating timer
//! that runs [`FailsafeSupervisor::tick`] and a channel that delivers
//! [`InputEvent`]s to [`FailsafeSupervisor::handle_input`]. Once failsafe is
//! engaged the timer drops itself and the supervisor rejects every event
//! except an exit request.

use crate::draw::Renderer;
use crate::failsafe::{FailsafeSupervisor, Flow};
use crate::input::InputEvent;
use crate::ui::IndicatorDisplay;
use anyhow::{Result, anyhow};
use calloop::channel::{Channel, Event as ChannelEvent};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time base shared by the scheduler and whoever timestamps input.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the session started.
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An exit event arrived
    Exit,
    /// Every input sender was dropped; one final tick ran afterwards unless
    /// failsafe had already stopped ticking
    InputClosed,
    /// The shared stop flag was raised (signal, replay feeder)
    StopRequested,
}

/// Result of a finished run. The supervisor is handed back for inspection.
pub struct RunSummary<R: Renderer, I: IndicatorDisplay> {
    pub supervisor: FailsafeSupervisor<R, I>,
    pub ticks: u64,
    pub reason: StopReason,
}

struct LoopData<R: Renderer, I: IndicatorDisplay> {
    supervisor: FailsafeSupervisor<R, I>,
    clock: SessionClock,
    ticks: u64,
    /// Set once failsafe detached input
    detached: bool,
    input_closed: bool,
    stop: Option<StopReason>,
}

/// Runs the session until exit, input close or a stop request.
///
/// `interval` is the tick period; `stop_flag` may be raised from any thread.
pub fn run<R: Renderer, I: IndicatorDisplay>(
    supervisor: FailsafeSupervisor<R, I>,
    input: Channel<InputEvent>,
    clock: SessionClock,
    interval: Duration,
    stop_flag: Arc<AtomicBool>,
) -> Result<RunSummary<R, I>> {
    let mut event_loop: EventLoop<LoopData<R, I>> =
        EventLoop::try_new().map_err(|e| anyhow!("Failed to create event loop: {}", e))?;
    let handle = event_loop.handle();
    let signal = event_loop.get_signal();

    handle
        .insert_source(Timer::from_duration(interval), move |_deadline, _, data| {
            let flow = data.supervisor.tick(data.clock.now());
            data.ticks += 1;

            if flow == Flow::Halted {
                warn!("Failsafe active, tick timer stopped after {} tick(s)", data.ticks);
                return TimeoutAction::Drop;
            }
            if data.input_closed && data.stop.is_none() {
                data.stop = Some(StopReason::InputClosed);
            }
            TimeoutAction::ToDuration(interval)
        })
        .map_err(|e| anyhow!("Failed to insert tick timer: {}", e.error))?;

    handle
        .insert_source(input, |event, _, data| match event {
            ChannelEvent::Msg(input_event) => {
                if data.supervisor.handle_input(input_event) == Flow::Exit {
                    info!("Exit requested");
                    data.stop = Some(StopReason::Exit);
                }
            }
            ChannelEvent::Closed => {
                debug!("Input channel closed");
                data.input_closed = true;
            }
        })
        .map_err(|e| anyhow!("Failed to insert input channel: {}", e.error))?;

    let mut data = LoopData {
        supervisor,
        clock,
        ticks: 0,
        detached: false,
        input_closed: false,
        stop: None,
    };

    info!(
        "Scheduler running at {:.1} ticks/s",
        1.0 / interval.as_secs_f64().max(f64::EPSILON)
    );

    event_loop
        .run(Some(interval), &mut data, |data| {
            if !data.detached && !data.supervisor.input_attached() {
                data.detached = true;
                info!("Input listeners detached");
            }
            if data.detached && data.input_closed && data.stop.is_none() {
                data.stop = Some(StopReason::InputClosed);
            }
            if data.stop.is_none() && stop_flag.load(Ordering::SeqCst) {
                data.stop = Some(StopReason::StopRequested);
            }
            if data.stop.is_some() {
                signal.stop();
            }
        })
        .map_err(|e| anyhow!("Event loop error: {}", e))?;

    let reason = data.stop.unwrap_or(StopReason::StopRequested);
    info!("Scheduler stopped ({:?}) after {} tick(s)", reason, data.ticks);

    Ok(RunSummary {
        supervisor: data.supervisor,
        ticks: data.ticks,
        reason,
    })
}
