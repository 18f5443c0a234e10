//! Projectile motion: a precomputed path with an analytically placed marker.

use std::time::Duration;

use kinematics::{FlightMetrics, Launch, Point, Trajectory};
use tracing::{debug, info};

use super::{Simulation, clear, extent};
use crate::driver::{AnimationDriver, Flow, RunState};
use crate::error::Result;
use crate::messages::Demo;
use crate::params::{Metric, ParamSet, ParamSpec};
use crate::scheduler::{FrameId, FrameQueue};
use crate::surface::{Color, DrawingSurface, Paint};

/// Slider declarations.
pub static PARAMS: [ParamSpec; 2] = [
    ParamSpec {
        name: "velocity",
        label: "Initial Velocity",
        unit: "m/s",
        min: 10.0,
        max: 100.0,
        step: 1.0,
        default: 50.0,
    },
    ParamSpec {
        name: "angle",
        label: "Launch Angle",
        unit: "°",
        min: 0.0,
        max: 90.0,
        step: 1.0,
        default: 45.0,
    },
];

const VELOCITY: usize = 0;
const ANGLE: usize = 1;

/// Distance in pixels from the surface edges to the launch point.
const MARGIN: f64 = 50.0;
/// Fallback range in meters when the real range is zero.
const NOMINAL_RANGE: f64 = 100.0;
/// Ranges at or below this count as zero when scaling.
const RANGE_EPSILON: f64 = 1e-9;
/// Launch speed that replays in real time.
const REFERENCE_SPEED: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
struct Flight {
    started_at: Duration,
    speed_multiplier: f64,
}

/// Projectile demo engine.
pub struct ProjectileSimulation<S> {
    driver: AnimationDriver,
    params: ParamSet,
    surface: Option<S>,
    launch: Launch,
    flight: FlightMetrics,
    trajectory: Trajectory,
    run: Option<Flight>,
    frames: u64,
}

impl<S: DrawingSurface> ProjectileSimulation<S> {
    /// Creates the engine with default parameters.
    pub fn new(surface: Option<S>) -> Self {
        let mut sim = Self {
            driver: AnimationDriver::new(Demo::Projectile),
            params: ParamSet::new(Demo::Projectile, &PARAMS),
            surface,
            launch: Launch::new(REFERENCE_SPEED, 45.0),
            flight: FlightMetrics::default(),
            trajectory: Trajectory::default(),
            run: None,
            frames: 0,
        };
        sim.recompute();
        sim
    }

    /// The launch described by the current sliders.
    pub const fn launch(&self) -> &Launch {
        &self.launch
    }

    /// Flight metrics for the current launch.
    pub const fn flight(&self) -> FlightMetrics {
        self.flight
    }

    /// Sampled path for the current launch.
    pub const fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Pixels per meter, fitting the full range across the surface.
    pub fn scale(&self) -> f64 {
        let (width, _) = extent(self.surface.as_ref(), Demo::Projectile);
        scale_for(width, self.flight.range)
    }

    fn recompute(&mut self) {
        self.launch = Launch::new(self.params.value(VELOCITY), self.params.value(ANGLE));
        self.flight = self.launch.metrics();
        self.trajectory = self.launch.trajectory();
        debug!(
            samples = self.trajectory.len(),
            range = self.flight.range,
            "trajectory recomputed"
        );
    }
}

impl<S: DrawingSurface> Simulation<S> for ProjectileSimulation<S> {
    fn demo(&self) -> Demo {
        Demo::Projectile
    }

    fn run_state(&self) -> RunState {
        self.driver.state()
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<f64> {
        let stored = self.params.set(name, value)?;
        self.recompute();
        if self.driver.is_running() {
            debug!(param = name, "flight stopped by parameter change");
            self.stop();
        }
        Ok(stored)
    }

    fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Max Height", self.flight.max_height, "m"),
            Metric::new("Time of Flight", self.flight.time_of_flight, "s"),
            Metric::new("Range", self.flight.range, "m"),
        ]
    }

    fn start(&mut self, now: Duration, queue: &FrameQueue) -> bool {
        let scale = self.scale();
        let Some(surface) = self.surface.as_mut() else {
            debug!("projectile start ignored: no surface");
            return false;
        };
        if !self.driver.begin(queue) {
            return false;
        }
        self.run = Some(Flight {
            started_at: now,
            speed_multiplier: self.launch.speed() / REFERENCE_SPEED,
        });
        self.frames = 0;
        draw_scene(surface, &self.trajectory, scale, None);
        info!(
            velocity = self.launch.speed(),
            angle = self.launch.angle_degrees(),
            "projectile launched"
        );
        true
    }

    fn on_frame(&mut self, id: FrameId, now: Duration, queue: &FrameQueue) -> Option<Flow> {
        let scale = self.scale();
        let Self {
            driver,
            surface,
            launch,
            flight,
            trajectory,
            run,
            frames,
            ..
        } = self;

        let Some(canvas) = surface.as_mut() else {
            if driver.pending_id() == Some(id) {
                driver.cancel();
                *run = None;
            }
            return None;
        };

        let flow = driver.advance(id, queue, || {
            let Some(active) = run.as_ref() else {
                return Flow::Settle;
            };
            let elapsed =
                now.saturating_sub(active.started_at).as_secs_f64() * active.speed_multiplier;
            let t = elapsed.min(flight.time_of_flight);
            let position = launch.position_at(t);

            draw_scene(canvas, trajectory, scale, Some(position));
            *frames += 1;

            if position.y < 0.0 || t >= flight.time_of_flight {
                Flow::Settle
            } else {
                Flow::Continue
            }
        })?;

        if flow == Flow::Settle {
            *run = None;
            canvas.clear();
            info!(frames = *frames, "projectile landed");
        }
        Some(flow)
    }

    fn stop(&mut self) {
        self.driver.cancel();
        self.run = None;
        clear(&mut self.surface);
    }

    fn reset(&mut self) {
        self.stop();
        self.params.reset();
        self.recompute();
        self.frames = 0;
        info!("projectile reset");
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

fn scale_for(width: f64, range: f64) -> f64 {
    let span = if range > RANGE_EPSILON {
        range
    } else {
        NOMINAL_RANGE
    };
    (width - 2.0 * MARGIN) / span
}

/// Maps world meters to surface pixels with the origin at the launch point.
fn to_surface(p: Point, scale: f64, height: f64) -> Point {
    Point::new(p.x * scale + MARGIN, height - MARGIN - p.y * scale)
}

fn draw_scene<S: DrawingSurface>(
    surface: &mut S,
    trajectory: &Trajectory,
    scale: f64,
    marker: Option<Point>,
) {
    let (width, height) = (surface.width(), surface.height());
    surface.clear();

    surface.stroke_line(
        Point::new(0.0, height - MARGIN),
        Point::new(width, height - MARGIN),
        Color::DARK_GRAY,
        1.0,
    );

    if !trajectory.is_empty() {
        let path: Vec<Point> = trajectory
            .iter()
            .map(|&p| to_surface(p, scale, height))
            .collect();
        surface.stroke_path(&path, Color::GREEN, 2.5);
    }

    if let Some(position) = marker.filter(|p| p.y >= 0.0) {
        let center = to_surface(position, scale, height);
        surface.fill_circle(center, 12.0, Paint::glowing(Color::WHITE, Color::RED));
        surface.fill_circle(center, 8.0, Paint::solid(Color::RED));
    }
}
