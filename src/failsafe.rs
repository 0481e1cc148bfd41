//! Failure boundary around the whole annotation pipeline.
//!
//! [`FailsafeSupervisor`] owns the session state (classifier, tool state,
//! pointer, engine) together with the renderer and indicator. Every entry
//! point returns a [`Flow`]; the first fault anywhere wipes all annotations,
//! shows the failsafe indicator, detaches input and freezes the session for
//! the rest of the process.

use crate::annotate::{AnnotationEngine, EngineError, HistoryError, ToolStyles};
use crate::draw::{ANNOTATION_TAG, ObjectHandle, Point, RenderError, Renderer, StrokeRecord};
use crate::input::{
    ClassifyError, ClickType, GestureClassifier, GestureThresholds, InputEvent, ToolState,
    TransitionError,
};
use crate::ui::{Indicator, IndicatorDisplay};
use log::{debug, error, info, warn};
use std::time::Duration;
use thiserror::Error;

/// Every fault the pipeline can raise. None of them is recoverable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceFault {
    #[error("input classification error: {0}")]
    InputClassification(#[from] ClassifyError),

    #[error("state transition error: {0}")]
    StateTransition(#[from] TransitionError),

    #[error("render operation error: {0}")]
    RenderOperation(#[from] RenderError),

    #[error("undo/clear error: {0}")]
    UndoClear(#[from] HistoryError),
}

impl From<EngineError> for SurfaceFault {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Render(err) => SurfaceFault::RenderOperation(err),
            EngineError::History(err) => SurfaceFault::UndoClear(err),
            EngineError::Transition(err) => SurfaceFault::StateTransition(err),
        }
    }
}

/// The fault that froze the session.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultRecord {
    /// Entry point that failed
    pub operation: &'static str,
    pub cause: SurfaceFault,
}

impl FaultRecord {
    fn new(operation: &'static str, cause: impl Into<SurfaceFault>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }
}

/// What the caller should do after an entry point returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    /// Keep ticking and delivering input
    Continue,
    /// Operator asked to leave
    Exit,
    /// Failsafe is active: stop rescheduling ticks, detach input
    Halted,
}

/// Settings the supervisor needs to build a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    pub thresholds: GestureThresholds,
    pub styles: ToolStyles,
    /// How long the undo/clear indicator stays after the action
    pub indicator_linger: Duration,
}

/// Mutable session state, owned by exactly one supervisor.
#[derive(Debug)]
struct Session {
    classifier: GestureClassifier,
    state: ToolState,
    pointer: Point,
    engine: AnnotationEngine,
}

pub struct FailsafeSupervisor<R: Renderer, I: IndicatorDisplay> {
    session: Session,
    renderer: R,
    indicator: I,
    indicator_linger: Duration,
    /// When the current undo/clear indicator was shown
    action_shown_at: Option<Duration>,
    input_attached: bool,
    fault: Option<FaultRecord>,
}

impl<R: Renderer, I: IndicatorDisplay> FailsafeSupervisor<R, I> {
    /// Starts a session in the pointer state with an empty registry.
    pub fn new(settings: SurfaceSettings, renderer: R, indicator: I) -> Self {
        Self {
            session: Session {
                classifier: GestureClassifier::new(settings.thresholds),
                state: ToolState::Pointer,
                pointer: Point::default(),
                engine: AnnotationEngine::new(settings.styles),
            },
            renderer,
            indicator,
            indicator_linger: settings.indicator_linger,
            action_shown_at: None,
            input_attached: true,
            fault: None,
        }
    }

    pub fn state(&self) -> ToolState {
        self.session.state
    }

    pub fn pointer(&self) -> Point {
        self.session.pointer
    }

    /// Finalized annotation handles, bottom to top.
    pub fn registry(&self) -> &[ObjectHandle] {
        self.session.engine.registry()
    }

    pub fn snapshot(&self) -> Option<&[StrokeRecord]> {
        self.session.engine.snapshot()
    }

    pub fn engine(&self) -> &AnnotationEngine {
        &self.session.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn fault(&self) -> Option<&FaultRecord> {
        self.fault.as_ref()
    }

    pub fn is_failsafe(&self) -> bool {
        self.session.state == ToolState::Failsafe
    }

    /// False once failsafe detached the input listeners.
    pub fn input_attached(&self) -> bool {
        self.input_attached
    }

    /// Delivers one platform event.
    ///
    /// Button events go through the classifier; the resulting click waits
    /// for the next tick. After failsafe nothing reaches the classifier, but
    /// an exit request is still honored.
    pub fn handle_input(&mut self, event: InputEvent) -> Flow {
        if !self.input_attached {
            match event {
                InputEvent::Exit => return Flow::Exit,
                InputEvent::Button(pointer_event) => {
                    warn!("Input detached, ignoring {:?}", pointer_event)
                }
                InputEvent::Motion(position) => {
                    debug!("Input detached, dropping motion to {:?}", position)
                }
            }
            return Flow::Halted;
        }

        match event {
            InputEvent::Motion(position) => {
                self.session.pointer = position;
                Flow::Continue
            }
            InputEvent::Exit => Flow::Exit,
            InputEvent::Button(pointer_event) => {
                self.session.pointer = pointer_event.position;
                match self.session.classifier.handle(&pointer_event) {
                    Ok(_) => Flow::Continue,
                    Err(err) => self.enter_failsafe(FaultRecord::new("click classification", err)),
                }
            }
        }
    }

    /// Runs one scheduler tick at monotonic time `now`.
    ///
    /// Sequence: pending click → transition → engine dispatch (which
    /// finalizes exited strokes first) → indicator.
    pub fn tick(&mut self, now: Duration) -> Flow {
        if self.is_failsafe() {
            return Flow::Halted;
        }
        match self.run_tick(now) {
            Ok(()) => Flow::Continue,
            Err(record) => self.enter_failsafe(record),
        }
    }

    fn run_tick(&mut self, now: Duration) -> Result<(), FaultRecord> {
        let click = self.session.classifier.take_click();
        let previous = self.session.state;
        let entered = previous
            .transition(click)
            .map_err(|err| FaultRecord::new("state transition", err))?;
        if click != ClickType::None {
            debug!("{:?}: {} -> {}", click, previous.label(), entered.label());
        }
        self.session.state = entered;

        let settled = self
            .session
            .engine
            .tick(entered, self.session.pointer, &mut self.renderer)
            .map_err(|err| FaultRecord::new(dispatch_operation(entered), err))?;
        self.session.state = settled;

        self.update_indicator(entered, now);
        Ok(())
    }

    fn update_indicator(&mut self, entered: ToolState, now: Duration) {
        match Indicator::for_state(entered) {
            Some(indicator) if matches!(entered, ToolState::Undo | ToolState::Clear) => {
                self.indicator.display(indicator);
                self.action_shown_at = Some(now);
            }
            Some(indicator) => {
                self.indicator.display(indicator);
                self.action_shown_at = None;
            }
            None => {
                let linger = self.indicator_linger;
                let expired = self
                    .action_shown_at
                    .is_none_or(|shown| now.saturating_sub(shown) > linger);
                if expired {
                    self.indicator.clear();
                    self.action_shown_at = None;
                }
            }
        }
    }

    fn enter_failsafe(&mut self, record: FaultRecord) -> Flow {
        error!(
            "FAILSAFE engaged: {} failed: {}",
            record.operation, record.cause
        );
        self.session.state = ToolState::Failsafe;
        self.input_attached = false;

        match self.renderer.delete_all_tagged(ANNOTATION_TAG) {
            Ok(count) => info!("Failsafe removed {} annotation object(s)", count),
            Err(err) => error!("Failsafe could not remove annotations: {}", err),
        }
        self.session.engine.forget_all();

        self.indicator.clear();
        self.indicator.display(Indicator::Failsafe);
        self.action_shown_at = None;
        self.fault = Some(record);
        Flow::Halted
    }
}

fn dispatch_operation(state: ToolState) -> &'static str {
    match state {
        ToolState::Pointer => "pointer tick",
        ToolState::Draw => "draw tick",
        ToolState::Erase => "erase tick",
        ToolState::Line => "line tick",
        ToolState::Undo => "undo",
        ToolState::Clear => "clear",
        ToolState::Failsafe => "failsafe dispatch",
    }
}
