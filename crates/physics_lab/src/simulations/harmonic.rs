//! Simple harmonic motion of a mass on a spring.

use std::time::Duration;

use kinematics::{Oscillator, Point};
use tracing::{debug, info};

use super::{Simulation, clear};
use crate::driver::{AnimationDriver, Flow, RunState};
use crate::error::Result;
use crate::messages::Demo;
use crate::params::{Metric, ParamSet, ParamSpec};
use crate::scheduler::{FrameId, FrameQueue};
use crate::surface::{Color, DrawingSurface, Paint};

/// Slider declarations.
pub static PARAMS: [ParamSpec; 3] = [
    ParamSpec {
        name: "mass",
        label: "Mass",
        unit: "kg",
        min: 0.5,
        max: 10.0,
        step: 0.1,
        default: 2.0,
    },
    ParamSpec {
        name: "stiffness",
        label: "Spring Constant",
        unit: "N/m",
        min: 1.0,
        max: 50.0,
        step: 0.5,
        default: 10.0,
    },
    ParamSpec {
        name: "amplitude",
        label: "Amplitude",
        unit: "px",
        min: 20.0,
        max: 250.0,
        step: 1.0,
        default: 100.0,
    },
];

const MASS: usize = 0;
const STIFFNESS: usize = 1;
const AMPLITUDE: usize = 2;

/// X coordinate where the spring is anchored.
const ORIGIN_X: f64 = 100.0;
const MASS_SIZE: f64 = 50.0;

/// Harmonic-motion demo engine.
///
/// Every frame reads the live sliders, so amplitude and frequency changes
/// show up immediately. Time is measured from Start.
pub struct HarmonicSimulation<S> {
    driver: AnimationDriver,
    params: ParamSet,
    surface: Option<S>,
    started_at: Option<Duration>,
    displacement: f64,
    frames: u64,
}

impl<S: DrawingSurface> HarmonicSimulation<S> {
    /// Creates the engine with default parameters.
    pub fn new(surface: Option<S>) -> Self {
        Self {
            driver: AnimationDriver::new(Demo::Harmonic),
            params: ParamSet::new(Demo::Harmonic, &PARAMS),
            surface,
            started_at: None,
            displacement: 0.0,
            frames: 0,
        }
    }

    /// Oscillator described by the current sliders.
    pub fn oscillator(&self) -> Oscillator {
        Oscillator::new(
            self.params.value(MASS),
            self.params.value(STIFFNESS),
            self.params.value(AMPLITUDE),
        )
    }

    /// Displacement drawn by the most recent frame (0 at rest).
    pub const fn displacement(&self) -> f64 {
        self.displacement
    }

    fn show_rest_pose(&mut self) {
        self.displacement = 0.0;
        if let Some(surface) = self.surface.as_mut() {
            draw_pose(surface, 0.0);
        }
    }
}

impl<S: DrawingSurface> Simulation<S> for HarmonicSimulation<S> {
    fn demo(&self) -> Demo {
        Demo::Harmonic
    }

    fn run_state(&self) -> RunState {
        self.driver.state()
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<f64> {
        self.params.set(name, value)
    }

    fn metrics(&self) -> Vec<Metric> {
        let osc = self.oscillator();
        vec![
            Metric::new("Period", osc.period(), "s"),
            Metric::new("Frequency", osc.frequency(), "Hz"),
            Metric::new("Max Speed", osc.max_speed(), "px/s"),
        ]
    }

    fn start(&mut self, now: Duration, queue: &FrameQueue) -> bool {
        if self.surface.is_none() {
            debug!("harmonic start ignored: no surface");
            return false;
        }
        if !self.driver.begin(queue) {
            return false;
        }
        self.started_at = Some(now);
        self.frames = 0;
        info!(omega = self.oscillator().angular_frequency(), "oscillator released");
        true
    }

    fn on_frame(&mut self, id: FrameId, now: Duration, queue: &FrameQueue) -> Option<Flow> {
        let osc = self.oscillator();
        let Self {
            driver,
            surface,
            started_at,
            displacement,
            frames,
            ..
        } = self;

        let Some(canvas) = surface.as_mut() else {
            if driver.pending_id() == Some(id) {
                driver.cancel();
                *started_at = None;
            }
            return None;
        };

        driver.advance(id, queue, || {
            let Some(start) = *started_at else {
                return Flow::Settle;
            };
            let t = now.saturating_sub(start).as_secs_f64();
            *displacement = osc.displacement(t);
            draw_pose(canvas, *displacement);
            *frames += 1;
            Flow::Continue
        })
    }

    fn stop(&mut self) {
        self.driver.cancel();
        self.started_at = None;
        self.displacement = 0.0;
        clear(&mut self.surface);
    }

    fn reset(&mut self) {
        self.stop();
        self.params.reset();
        self.frames = 0;
        self.show_rest_pose();
        info!("harmonic reset");
    }

    fn on_enter(&mut self) {
        if !self.driver.is_running() {
            self.show_rest_pose();
        }
    }

    fn pending_frame(&self) -> Option<FrameId> {
        self.driver.pending_id()
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }

    fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }
}

fn draw_pose<S: DrawingSurface>(surface: &mut S, displacement: f64) {
    let center_y = surface.height() / 2.0;
    let mass_x = ORIGIN_X + displacement;
    surface.clear();
    surface.stroke_line(
        Point::new(ORIGIN_X, center_y),
        Point::new(mass_x, center_y),
        Color::GREEN,
        6.0,
    );
    surface.fill_rect(
        mass_x,
        center_y - MASS_SIZE / 2.0,
        MASS_SIZE,
        MASS_SIZE,
        Paint::glowing(Color::RED, Color::RED),
    );
}
