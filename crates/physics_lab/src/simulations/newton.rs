//! Newton's second law: a block pushed along a rough track.

use std::f64::consts::PI;
use std::time::Duration;

use kinematics::{ForceBalance, Point, STANDARD_GRAVITY, SlidingBlock, sign};
use tracing::{debug, info};

use super::{Simulation, clear, extent};
use crate::driver::{AnimationDriver, Flow, RunState};
use crate::error::Result;
use crate::messages::Demo;
use crate::params::{Metric, ParamSet, ParamSpec};
use crate::scheduler::{FrameId, FrameQueue};
use crate::surface::{Color, DrawingSurface, Paint};

/// Slider declarations.
pub static PARAMS: [ParamSpec; 3] = [
    ParamSpec {
        name: "force",
        label: "Applied Force",
        unit: "N",
        min: -50.0,
        max: 50.0,
        step: 1.0,
        default: 0.0,
    },
    ParamSpec {
        name: "mass",
        label: "Mass",
        unit: "kg",
        min: 1.0,
        max: 20.0,
        step: 1.0,
        default: 10.0,
    },
    ParamSpec {
        name: "friction",
        label: "Friction Coefficient",
        unit: "μ",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.5,
    },
];

const FORCE: usize = 0;
const MASS: usize = 1;
const FRICTION: usize = 2;

/// Fixed integration step in seconds.
pub const TIME_STEP: f64 = 0.016;
/// Track pixels per meter of displacement.
const TRACK_SCALE: f64 = 60.0;
/// Arrow length per newton.
const ARROW_SCALE: f64 = 3.0;

const BLOCK_WIDTH: f64 = 60.0;
const BLOCK_HEIGHT: f64 = 40.0;
/// Clearance kept between the block and either end of the track.
const TRACK_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy)]
struct Push {
    forces: ForceBalance,
    block: SlidingBlock,
}

/// Newton's-law demo engine.
///
/// Forces are solved once at Start and frozen for the run; later slider
/// moves only take effect on the next Start.
pub struct NewtonSimulation<S> {
    driver: AnimationDriver,
    params: ParamSet,
    surface: Option<S>,
    forces: ForceBalance,
    run: Option<Push>,
    frames: u64,
}

impl<S: DrawingSurface> NewtonSimulation<S> {
    /// Creates the engine with default parameters and zeroed metrics.
    pub fn new(surface: Option<S>) -> Self {
        Self {
            driver: AnimationDriver::new(Demo::Newton),
            params: ParamSet::new(Demo::Newton, &PARAMS),
            surface,
            forces: ForceBalance::default(),
            run: None,
            frames: 0,
        }
    }

    /// Forces frozen at the most recent Start (zero before any Start).
    pub const fn forces(&self) -> ForceBalance {
        self.forces
    }

    /// Left edge of the block, if a run is active.
    pub fn block_position(&self) -> Option<f64> {
        self.run.map(|push| push.block.position)
    }
}

impl<S: DrawingSurface> Simulation<S> for NewtonSimulation<S> {
    fn demo(&self) -> Demo {
        Demo::Newton
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
            Metric::new("Friction Force", self.forces.friction, "N"),
            Metric::new("Net Force", self.forces.net, "N"),
            Metric::new("Acceleration", self.forces.acceleration, "m/s²"),
        ]
    }

    fn start(&mut self, _now: Duration, queue: &FrameQueue) -> bool {
        let (width, _) = extent(self.surface.as_ref(), Demo::Newton);
        if self.surface.is_none() {
            debug!("newton start ignored: no surface");
            return false;
        }
        if !self.driver.begin(queue) {
            return false;
        }
        let forces = ForceBalance::solve(
            self.params.value(FORCE),
            self.params.value(MASS),
            self.params.value(FRICTION),
            STANDARD_GRAVITY,
        );
        self.forces = forces;
        self.run = Some(Push {
            forces,
            block: SlidingBlock::at_rest((width - BLOCK_WIDTH) / 2.0),
        });
        self.frames = 0;
        info!(
            net = forces.net,
            acceleration = forces.acceleration,
            "block released"
        );
        true
    }

    fn on_frame(&mut self, id: FrameId, _now: Duration, queue: &FrameQueue) -> Option<Flow> {
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

        let flow = driver.advance(id, queue, || {
            let Some(push) = run.as_mut() else {
                return Flow::Settle;
            };
            let x = push
                .block
                .step(push.forces.acceleration, TIME_STEP, TRACK_SCALE);
            draw_scene(canvas, x, &push.forces);
            *frames += 1;

            let off_track = x > canvas.width() - BLOCK_WIDTH - TRACK_MARGIN || x < TRACK_MARGIN;
            if off_track || push.forces.is_balanced() {
                Flow::Settle
            } else {
                Flow::Continue
            }
        })?;

        if flow == Flow::Settle {
            *run = None;
            canvas.clear();
            info!(frames = *frames, "block stopped");
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
        self.forces = ForceBalance::default();
        self.frames = 0;
        info!("newton reset");
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

fn draw_scene<S: DrawingSurface>(surface: &mut S, block_x: f64, forces: &ForceBalance) {
    let (width, height) = (surface.width(), surface.height());
    let block_y = height - 90.0;
    surface.clear();

    surface.stroke_line(
        Point::new(0.0, height - 50.0),
        Point::new(width, height - 50.0),
        Color::GRAY,
        3.0,
    );
    surface.fill_rect(
        block_x,
        block_y,
        BLOCK_WIDTH,
        BLOCK_HEIGHT,
        Paint::solid(Color::GREEN),
    );

    let cx = block_x + BLOCK_WIDTH / 2.0;
    let cy = block_y + BLOCK_HEIGHT / 2.0;

    draw_arrow(
        surface,
        Point::new(cx, cy),
        Point::new(cx + forces.applied * ARROW_SCALE, cy),
        Color::RED,
    );
    // Friction points against the net force, not the motion.
    draw_arrow(
        surface,
        Point::new(cx, cy + 20.0),
        Point::new(
            cx - sign(forces.net) * forces.friction.abs() * ARROW_SCALE,
            cy + 20.0,
        ),
        Color::BLUE,
    );
    draw_arrow(
        surface,
        Point::new(cx, cy - 20.0),
        Point::new(cx + forces.net * ARROW_SCALE, cy - 20.0),
        Color::PURPLE,
    );
}

fn draw_arrow<S: DrawingSurface>(surface: &mut S, from: Point, to: Point, color: Color) {
    const HEAD_LENGTH: f64 = 18.0;
    const HEAD_SPREAD: f64 = PI / 7.0;

    surface.stroke_line(from, to, color, 6.0);

    let angle = (to - from).angle();
    let barb = |offset: f64| {
        Point::new(
            to.x - HEAD_LENGTH * (angle + offset).cos(),
            to.y - HEAD_LENGTH * (angle + offset).sin(),
        )
    };
    let head = [to, barb(-HEAD_SPREAD), barb(HEAD_SPREAD)];
    surface.stroke_path(&[head[0], head[1], head[2], head[0]], color, 6.0);
    surface.fill_path(&head, color);
}
