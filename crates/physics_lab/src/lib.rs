#![forbid(unsafe_code)]
// Allow pedantic lints for early development
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]

//! # Physics Lab
//!
//! Four interactive classical-mechanics demonstrations driven frame by frame:
//!
//! - **Projectile Motion**: launch speed and angle, sampled flight path
//! - **Newton's Laws**: applied force against kinetic friction on a block
//! - **Harmonic Motion**: a mass on a spring, sampled analytically
//! - **Collision & Momentum**: two balls, elastic walls, elastic impacts
//!
//! The core is headless. Engines draw through [`DrawingSurface`] and animate
//! through a shared [`FrameQueue`]; the [`TabController`] guarantees at most
//! one demo is animating. The terminal front end ([`App`], [`terminal`])
//! plugs a [`TerminalCanvas`] into the same engines.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use physics_lab::{Demo, RecordingSurface, RunState, TabController};
//!
//! let mut tabs = TabController::<RecordingSurface>::new(Demo::Collision);
//! tabs.start(Demo::Collision, Duration::ZERO);
//! for i in 1..=10u32 {
//!     tabs.pump(Duration::from_millis(16) * i);
//! }
//!
//! let sim = tabs.simulation(Demo::Collision);
//! assert_eq!(sim.run_state(), RunState::Running);
//! assert_eq!(sim.frames_rendered(), 10);
//! ```

pub mod app;
pub mod canvas;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod messages;
pub mod params;
pub mod scheduler;
pub mod self_check;
pub mod simulations;
pub mod surface;
pub mod tabs;
pub mod terminal;

pub use app::{App, Control};
pub use canvas::TerminalCanvas;
pub use cli::{Cli, LogFormat, LogLevel};
pub use config::{ColorMode, Config, FileConfig};
pub use driver::{AnimationDriver, Flow, RunState};
pub use error::{Error, Result};
pub use messages::{Command, Demo, ParamChange};
pub use params::{Metric, ParamSet, ParamSpec};
pub use scheduler::{FrameId, FrameQueue, FrameRequest, PendingFrame};
pub use simulations::{
    CollisionSimulation, HarmonicSimulation, NewtonSimulation, ProjectileSimulation, Simulation,
    Simulations,
};
pub use surface::{Color, DrawOp, DrawingSurface, Paint, RecordingSurface, TextAlign};
pub use tabs::TabController;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Command, Demo, DrawingSurface, Flow, FrameQueue, Metric, ParamChange, RecordingSurface,
        RunState, Simulation, Simulations, TabController, TerminalCanvas,
    };
}
