//! Click classification from raw press/release timing.
//!
//! Each button keeps its own last-press and last-release timestamps. A
//! release is classified as:
//!
//! 1. `Double` when it lands within the double-click threshold of the
//!    button's last *recorded* release,
//! 2. otherwise `Single` when the button was held for less than the
//!    long-press threshold (only this branch records the release time),
//! 3. otherwise `Long`.
//!
//! Neither `Double` nor `Long` refresh the recorded release time. A quick
//! click right after a long press is therefore compared against an older
//! release and cannot turn into a `Double` (which would map to undo and
//! could restore what the long press just cleared).

use super::events::{ButtonPhase, MouseButton, PointerEvent};
use log::debug;
use std::time::Duration;
use thiserror::Error;

/// Discrete gesture produced by one button release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickType {
    /// No classified release since the last read
    #[default]
    None,
    LeftSingle,
    LeftDouble,
    LeftLong,
    RightSingle,
    RightDouble,
    RightLong,
}

impl ClickType {
    fn classified(button: MouseButton, kind: ClickKind) -> Self {
        match (button, kind) {
            (MouseButton::Left, ClickKind::Single) => ClickType::LeftSingle,
            (MouseButton::Left, ClickKind::Double) => ClickType::LeftDouble,
            (MouseButton::Left, ClickKind::Long) => ClickType::LeftLong,
            (MouseButton::Right, ClickKind::Single) => ClickType::RightSingle,
            (MouseButton::Right, ClickKind::Double) => ClickType::RightDouble,
            (MouseButton::Right, ClickKind::Long) => ClickType::RightLong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickKind {
    Single,
    Double,
    Long,
}

/// Timing thresholds for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureThresholds {
    /// Release-to-release window for a double click
    pub double_click: Duration,
    /// Press-to-release duration from which a click counts as long
    pub long_press: Duration,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            double_click: Duration::from_millis(200),
            long_press: Duration::from_millis(500),
        }
    }
}

/// Input that cannot be classified without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("{button:?} release at {at:?} without a recorded press")]
    UnpairedRelease { button: MouseButton, at: Duration },

    #[error("{button:?} {phase:?} at {at:?} precedes the previous event at {previous:?}")]
    NonMonotonic {
        button: MouseButton,
        phase: ButtonPhase,
        at: Duration,
        previous: Duration,
    },
}

#[derive(Debug, Default, Clone, Copy)]
struct ButtonTiming {
    last_press: Option<Duration>,
    last_release: Option<Duration>,
}

impl ButtonTiming {
    fn latest(&self) -> Option<Duration> {
        self.last_press.max(self.last_release)
    }
}

/// Per-button click classifier with a single pending-click slot.
#[derive(Debug)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    left: ButtonTiming,
    right: ButtonTiming,
    pending: ClickType,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            left: ButtonTiming::default(),
            right: ButtonTiming::default(),
            pending: ClickType::None,
        }
    }

    fn timing_mut(&mut self, button: MouseButton) -> &mut ButtonTiming {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
        }
    }

    /// Feeds one button event. Releases overwrite the pending click.
    pub fn handle(&mut self, event: &PointerEvent) -> Result<ClickType, ClassifyError> {
        match event.phase {
            ButtonPhase::Press => {
                self.on_press(event.button, event.timestamp)?;
                Ok(ClickType::None)
            }
            ButtonPhase::Release => self.on_release(event.button, event.timestamp),
        }
    }

    /// Records a press. Produces no click.
    pub fn on_press(&mut self, button: MouseButton, at: Duration) -> Result<(), ClassifyError> {
        let timing = self.timing_mut(button);
        if let Some(previous) = timing.latest().filter(|previous| at < *previous) {
            return Err(ClassifyError::NonMonotonic {
                button,
                phase: ButtonPhase::Press,
                at,
                previous,
            });
        }
        timing.last_press = Some(at);
        Ok(())
    }

    /// Classifies a release and stores it as the pending click.
    pub fn on_release(
        &mut self,
        button: MouseButton,
        at: Duration,
    ) -> Result<ClickType, ClassifyError> {
        let thresholds = self.thresholds;
        let timing = self.timing_mut(button);

        let Some(pressed_at) = timing.last_press else {
            return Err(ClassifyError::UnpairedRelease { button, at });
        };
        if let Some(previous) = timing.latest().filter(|previous| at < *previous) {
            return Err(ClassifyError::NonMonotonic {
                button,
                phase: ButtonPhase::Release,
                at,
                previous,
            });
        }

        let is_double = timing
            .last_release
            .is_some_and(|released_at| at - released_at < thresholds.double_click);

        let kind = if is_double {
            ClickKind::Double
        } else if at - pressed_at < thresholds.long_press {
            timing.last_release = Some(at);
            ClickKind::Single
        } else {
            ClickKind::Long
        };

        let click = ClickType::classified(button, kind);
        debug!("Classified {:?} release at {:?} as {:?}", button, at, click);
        self.pending = click;
        Ok(click)
    }

    /// Reads and resets the pending click (edge-triggered).
    pub fn take_click(&mut self) -> ClickType {
        std::mem::take(&mut self.pending)
    }
}
