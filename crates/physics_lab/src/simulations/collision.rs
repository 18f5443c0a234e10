//! Two balls on a track with elastic wall bounces and collisions.

use std::time::Duration;

use kinematics::{Body, Point, Walls, kinetic_energy, momentum};
use tracing::{debug, info, trace};

use super::{Simulation, clear};
use crate::driver::{AnimationDriver, Flow, RunState};
use crate::error::Result;
use crate::messages::Demo;
use crate::params::{Metric, ParamSet, ParamSpec};
use crate::scheduler::{FrameId, FrameQueue};
use crate::surface::{Color, DrawingSurface, Paint, TextAlign};

/// Slider declarations.
pub static PARAMS: [ParamSpec; 4] = [
    ParamSpec {
        name: "mass1",
        label: "Ball 1 Mass",
        unit: "kg",
        min: 1.0,
        max: 10.0,
        step: 0.1,
        default: 1.0,
    },
    ParamSpec {
        name: "mass2",
        label: "Ball 2 Mass",
        unit: "kg",
        min: 1.0,
        max: 10.0,
        step: 0.1,
        default: 2.0,
    },
    ParamSpec {
        name: "velocity1",
        label: "Ball 1 Initial Velocity",
        unit: "m/s",
        min: -100.0,
        max: 100.0,
        step: 1.0,
        default: 50.0,
    },
    ParamSpec {
        name: "velocity2",
        label: "Ball 2 Initial Velocity",
        unit: "m/s",
        min: -100.0,
        max: 100.0,
        step: 1.0,
        default: -20.0,
    },
];

const MASS1: usize = 0;
const MASS2: usize = 1;
const VELOCITY1: usize = 2;
const VELOCITY2: usize = 3;

/// Ball radius in pixels.
pub const RADIUS: f64 = 30.0;
/// Seed positions of the two balls.
pub const SEED_POSITIONS: (f64, f64) = (100.0, 400.0);
/// Track pixels per meter of displacement.
const TRACK_SCALE: f64 = 20.0;

/// Momentum and energy captured at Start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Conserved {
    /// `m1·v1 + m2·v2` in kg·m/s.
    pub momentum: f64,
    /// `½(m1·v1² + m2·v2²)` in J.
    pub energy: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rally {
    balls: [Body; 2],
    last_frame: Duration,
}

/// Collision demo engine.
///
/// Masses and the conserved-quantity readouts freeze at Start. The run
/// never settles on its own.
pub struct CollisionSimulation<S> {
    driver: AnimationDriver,
    params: ParamSet,
    surface: Option<S>,
    conserved: Conserved,
    run: Option<Rally>,
    frames: u64,
}

impl<S: DrawingSurface> CollisionSimulation<S> {
    /// Creates the engine with default parameters and zeroed readouts.
    pub fn new(surface: Option<S>) -> Self {
        Self {
            driver: AnimationDriver::new(Demo::Collision),
            params: ParamSet::new(Demo::Collision, &PARAMS),
            surface,
            conserved: Conserved::default(),
            run: None,
            frames: 0,
        }
    }

    /// Momentum and energy frozen at the most recent Start.
    pub const fn conserved(&self) -> Conserved {
        self.conserved
    }

    /// Both balls of the active run.
    pub fn balls(&self) -> Option<[Body; 2]> {
        self.run.map(|rally| rally.balls)
    }

    /// `|v1|` of the active run, or of the seed velocity when idle.
    pub fn ball1_speed(&self) -> f64 {
        self.run
            .map_or(self.params.value(VELOCITY1), |rally| rally.balls[0].velocity)
            .abs()
    }

    fn seed(&self) -> [Body; 2] {
        [
            Body::new(
                self.params.value(MASS1),
                SEED_POSITIONS.0,
                self.params.value(VELOCITY1),
            ),
            Body::new(
                self.params.value(MASS2),
                SEED_POSITIONS.1,
                self.params.value(VELOCITY2),
            ),
        ]
    }
}

impl<S: DrawingSurface> Simulation<S> for CollisionSimulation<S> {
    fn demo(&self) -> Demo {
        Demo::Collision
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
        vec![
            Metric::new("Total Momentum", self.conserved.momentum, "kg·m/s"),
            Metric::new("Total Energy", self.conserved.energy, "J"),
            Metric::new("Ball 1 Speed", self.ball1_speed(), "m/s"),
        ]
    }

    fn start(&mut self, now: Duration, queue: &FrameQueue) -> bool {
        if self.surface.is_none() {
            debug!("collision start ignored: no surface");
            return false;
        }
        if !self.driver.begin(queue) {
            return false;
        }
        let balls = self.seed();
        self.conserved = Conserved {
            momentum: balls.iter().map(|b| momentum(b.mass, b.velocity)).sum(),
            energy: balls
                .iter()
                .map(|b| kinetic_energy(b.mass, b.velocity))
                .sum(),
        };
        self.run = Some(Rally {
            balls,
            last_frame: now,
        });
        self.frames = 0;
        info!(
            momentum = self.conserved.momentum,
            energy = self.conserved.energy,
            "balls released"
        );
        true
    }

    fn on_frame(&mut self, id: FrameId, now: Duration, queue: &FrameQueue) -> Option<Flow> {
        let Self {
            driver,
            surface,
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

        driver.advance(id, queue, || {
            let Some(rally) = run.as_mut() else {
                return Flow::Settle;
            };
            let dt = now.saturating_sub(rally.last_frame).as_secs_f64();
            rally.last_frame = now;

            let walls = Walls::new(0.0, canvas.width());
            let [a, b] = &mut rally.balls;
            a.advance(dt, TRACK_SCALE);
            b.advance(dt, TRACK_SCALE);
            walls.bounce(a, RADIUS);
            walls.bounce(b, RADIUS);
            if a.overlaps(b, RADIUS) {
                a.collide_elastic(b);
                trace!(v1 = a.velocity, v2 = b.velocity, "balls collided");
            }

            draw_scene(canvas, &rally.balls);
            *frames += 1;
            Flow::Continue
        })
    }

    fn stop(&mut self) {
        self.driver.cancel();
        self.run = None;
        clear(&mut self.surface);
    }

    fn reset(&mut self) {
        self.stop();
        self.params.reset();
        self.conserved = Conserved::default();
        self.frames = 0;
        info!("collision reset");
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

fn draw_scene<S: DrawingSurface>(surface: &mut S, balls: &[Body; 2]) {
    let width = surface.width();
    let center_y = surface.height() / 2.0;
    let ground_y = center_y + RADIUS + 10.0;
    surface.clear();

    surface.stroke_line(
        Point::new(0.0, ground_y),
        Point::new(width, ground_y),
        Color::DARK_GRAY,
        2.0,
    );

    for (ball, color) in balls.iter().zip([Color::GREEN, Color::RED]) {
        surface.fill_circle(
            Point::new(ball.position, center_y),
            RADIUS,
            Paint::glowing(color, color),
        );
    }
    for ball in balls {
        surface.fill_text(
            &format!("{} kg", ball.mass),
            Point::new(ball.position, center_y),
            TextAlign::Center,
            Color::WHITE,
        );
    }
}
