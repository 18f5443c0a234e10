//! Simulation engines for the four demos.
//!
//! Each engine implements [`Simulation`], providing a consistent interface
//! for the [`TabController`](crate::TabController) to route commands and
//! frames to individual demos.

mod collision;
mod harmonic;
mod newton;
mod projectile;

pub use collision::CollisionSimulation;
pub use harmonic::HarmonicSimulation;
pub use newton::NewtonSimulation;
pub use projectile::ProjectileSimulation;

use std::time::Duration;

use crate::driver::{Flow, RunState};
use crate::error::Result;
use crate::messages::Demo;
use crate::params::{Metric, ParamSet};
use crate::scheduler::{FrameId, FrameQueue};
use crate::surface::DrawingSurface;

/// Trait for the per-demo engines.
///
/// Time is passed in as a monotonic timestamp (`now`) so runs are
/// reproducible under a synthetic clock.
pub trait Simulation<S: DrawingSurface> {
    /// Get the demo identifier.
    fn demo(&self) -> Demo;

    /// Current run state.
    fn run_state(&self) -> RunState;

    /// Current slider values.
    fn params(&self) -> &ParamSet;

    /// Value of one slider.
    fn param(&self, name: &str) -> Option<f64> {
        self.params().get(name)
    }

    /// Applies a slider change and recomputes derived metrics.
    ///
    /// Never starts a run. Returns the clamped value that was stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`](crate::Error::UnknownParameter)
    /// for a field this demo does not have.
    fn set_param(&mut self, name: &str, value: f64) -> Result<f64>;

    /// Derived metrics for display, in panel order.
    fn metrics(&self) -> Vec<Metric>;

    /// Starts a run at `now`.
    ///
    /// Returns `false` without side effects if already running or if no
    /// surface is attached.
    fn start(&mut self, now: Duration, queue: &FrameQueue) -> bool;

    /// Handles a delivered frame. Ids other than the awaited one are ignored.
    fn on_frame(&mut self, id: FrameId, now: Duration, queue: &FrameQueue) -> Option<Flow>;

    /// Cancels any pending frame, drops the run state and clears the surface.
    fn stop(&mut self);

    /// Stops, restores default parameters and recomputes metrics.
    fn reset(&mut self);

    /// Called when the demo becomes the visible tab.
    fn on_enter(&mut self) {}

    /// Id of the frame the engine is waiting for, if any.
    fn pending_frame(&self) -> Option<FrameId>;

    /// Frames rendered by the current or most recent run.
    fn frames_rendered(&self) -> u64;

    /// The attached drawing surface.
    fn surface(&self) -> Option<&S>;

    /// Attaches a drawing surface, replacing any previous one.
    fn attach_surface(&mut self, surface: S);

    /// Detaches the drawing surface. Running animations stop on their next
    /// frame.
    fn detach_surface(&mut self) -> Option<S>;
}

/// Container for all four engines.
pub struct Simulations<S: DrawingSurface> {
    /// Projectile motion.
    pub projectile: ProjectileSimulation<S>,
    /// Newton's second law.
    pub newton: NewtonSimulation<S>,
    /// Simple harmonic motion.
    pub harmonic: HarmonicSimulation<S>,
    /// Elastic collision.
    pub collision: CollisionSimulation<S>,
}

impl<S: DrawingSurface> Simulations<S> {
    /// Creates every engine with a surface of its demo's logical size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projectile: ProjectileSimulation::new(Some(surface_for(Demo::Projectile))),
            newton: NewtonSimulation::new(Some(surface_for(Demo::Newton))),
            harmonic: HarmonicSimulation::new(Some(surface_for(Demo::Harmonic))),
            collision: CollisionSimulation::new(Some(surface_for(Demo::Collision))),
        }
    }

    /// Creates every engine without a surface.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            projectile: ProjectileSimulation::new(None),
            newton: NewtonSimulation::new(None),
            harmonic: HarmonicSimulation::new(None),
            collision: CollisionSimulation::new(None),
        }
    }

    /// Get a reference to one engine.
    pub fn get(&self, demo: Demo) -> &dyn Simulation<S> {
        match demo {
            Demo::Projectile => &self.projectile,
            Demo::Newton => &self.newton,
            Demo::Harmonic => &self.harmonic,
            Demo::Collision => &self.collision,
        }
    }

    /// Get a mutable reference to one engine.
    pub fn get_mut(&mut self, demo: Demo) -> &mut dyn Simulation<S> {
        match demo {
            Demo::Projectile => &mut self.projectile,
            Demo::Newton => &mut self.newton,
            Demo::Harmonic => &mut self.harmonic,
            Demo::Collision => &mut self.collision,
        }
    }

    /// Mutable references to every engine, in tab order.
    pub fn all_mut(&mut self) -> [&mut dyn Simulation<S>; 4] {
        [
            &mut self.projectile,
            &mut self.newton,
            &mut self.harmonic,
            &mut self.collision,
        ]
    }
}

impl<S: DrawingSurface> Default for Simulations<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn surface_for<S: DrawingSurface>(demo: Demo) -> S {
    let (width, height) = demo.canvas_size();
    S::with_size(width, height)
}

/// Clears the surface if one is attached.
fn clear<S: DrawingSurface>(surface: &mut Option<S>) {
    if let Some(surface) = surface.as_mut() {
        surface.clear();
    }
}

/// Logical size of the attached surface, or the demo's nominal size.
fn extent<S: DrawingSurface>(surface: Option<&S>, demo: Demo) -> (f64, f64) {
    surface.map_or_else(|| demo.canvas_size(), |s| (s.width(), s.height()))
}
