//! Library exports for the surgimark annotation surface.
//!
//! The pipeline is split so each layer can be driven on its own: `input`
//! turns button timing into clicks and tool states, `annotate` builds and
//! finalizes strokes against a [`draw::Renderer`], `failsafe` wraps the whole
//! session, and `scheduler` runs it on a fixed-rate calloop tick. `headless`
//! ties these to an offscreen Cairo surface fed by a `replay` script.

pub mod annotate;
pub mod config;
pub mod draw;
pub mod failsafe;
pub mod headless;
pub mod input;
pub mod replay;
pub mod scheduler;
pub mod ui;
pub mod util;

pub use config::Config;
pub use failsafe::{FailsafeSupervisor, Flow, SurfaceFault};
