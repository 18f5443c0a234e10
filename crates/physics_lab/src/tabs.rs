//! Tab routing and the one-active-simulation rule.
//!
//! [`TabController`] owns every engine and the shared [`FrameQueue`]. A tab
//! switch synchronously stops every engine (cancelling frames and clearing
//! surfaces) before the new tab's setup runs, so at most one demo animates
//! at any time.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::messages::{Command, Demo, ParamChange};
use crate::scheduler::FrameQueue;
use crate::simulations::{Simulation, Simulations};
use crate::surface::DrawingSurface;

/// Owns the engines and routes commands and frames to them.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use physics_lab::{Demo, RecordingSurface, RunState, TabController};
///
/// let mut tabs = TabController::<RecordingSurface>::new(Demo::Projectile);
/// assert!(tabs.start(Demo::Projectile, Duration::ZERO));
///
/// tabs.switch_to(Demo::Harmonic);
/// assert_eq!(tabs.simulation(Demo::Projectile).run_state(), RunState::Idle);
/// assert_eq!(tabs.queue().pending_count(), 0);
/// ```
pub struct TabController<S: DrawingSurface> {
    active: Demo,
    simulations: Simulations<S>,
    queue: FrameQueue,
}

impl<S: DrawingSurface> TabController<S> {
    /// Creates every engine with its own surface and enters `initial`.
    #[must_use]
    pub fn new(initial: Demo) -> Self {
        Self::with_simulations(Simulations::new(), initial)
    }

    /// Wraps existing engines and enters `initial`.
    #[must_use]
    pub fn with_simulations(simulations: Simulations<S>, initial: Demo) -> Self {
        let mut tabs = Self {
            active: initial,
            simulations,
            queue: FrameQueue::new(),
        };
        tabs.simulations.get_mut(initial).on_enter();
        tabs
    }

    /// The visible demo.
    #[must_use]
    pub const fn active(&self) -> Demo {
        self.active
    }

    /// The shared frame queue.
    #[must_use]
    pub const fn queue(&self) -> &FrameQueue {
        &self.queue
    }

    /// All engines.
    #[must_use]
    pub const fn simulations(&self) -> &Simulations<S> {
        &self.simulations
    }

    /// One engine.
    #[must_use]
    pub fn simulation(&self, demo: Demo) -> &dyn Simulation<S> {
        self.simulations.get(demo)
    }

    /// One engine, mutably.
    pub fn simulation_mut(&mut self, demo: Demo) -> &mut dyn Simulation<S> {
        self.simulations.get_mut(demo)
    }

    /// The visible engine.
    #[must_use]
    pub fn current(&self) -> &dyn Simulation<S> {
        self.simulations.get(self.active)
    }

    /// Makes `demo` the visible tab.
    ///
    /// Every engine is stopped and its surface cleared first; then the new
    /// tab's [`Simulation::on_enter`] runs. Returns `false` if `demo` is
    /// already visible.
    pub fn switch_to(&mut self, demo: Demo) -> bool {
        if demo == self.active {
            return false;
        }
        for sim in self.simulations.all_mut() {
            sim.stop();
        }
        debug_assert_eq!(self.queue.pending_count(), 0);

        let from = self.active;
        self.active = demo;
        self.simulations.get_mut(demo).on_enter();
        info!(from = %from, to = %demo, "tab switched");
        true
    }

    /// Starts `demo` if it is the visible tab and not already running.
    pub fn start(&mut self, demo: Demo, now: Duration) -> bool {
        if demo != self.active {
            debug!(demo = %demo, active = %self.active, "start ignored: tab not visible");
            return false;
        }
        self.simulations.get_mut(demo).start(now, &self.queue)
    }

    /// Resets `demo` to its defaults.
    pub fn reset(&mut self, demo: Demo) {
        self.simulations.get_mut(demo).reset();
    }

    /// Applies a slider change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`](crate::Error::UnknownParameter)
    /// if the demo has no such field.
    pub fn set_param(&mut self, change: &ParamChange) -> Result<f64> {
        let stored = self
            .simulations
            .get_mut(change.demo)
            .set_param(&change.name, change.value)?;
        debug!(demo = %change.demo, param = %change.name, value = stored, "parameter set");
        Ok(stored)
    }

    /// Applies a UI command at time `now`.
    ///
    /// # Errors
    ///
    /// Propagates parameter errors from [`TabController::set_param`].
    pub fn dispatch(&mut self, command: Command, now: Duration) -> Result<()> {
        match command {
            Command::Start(demo) => {
                self.start(demo, now);
            }
            Command::Reset(demo) => self.reset(demo),
            Command::SwitchTab(demo) => {
                self.switch_to(demo);
            }
            Command::SetParam(change) => {
                self.set_param(&change)?;
            }
        }
        Ok(())
    }

    /// Delivers every due frame at time `now`. Returns the number of frames
    /// an engine acted on.
    ///
    /// A frame owned by a hidden tab stops that demo instead of being
    /// delivered.
    pub fn pump(&mut self, now: Duration) -> usize {
        let mut delivered = 0;
        for request in self.queue.take_due() {
            if request.owner != self.active {
                warn!(owner = %request.owner, frame = %request.id, "hidden tab was animating; stopped");
                self.simulations.get_mut(request.owner).stop();
                continue;
            }
            if self
                .simulations
                .get_mut(request.owner)
                .on_frame(request.id, now, &self.queue)
                .is_some()
            {
                delivered += 1;
            }
        }
        delivered
    }
}
