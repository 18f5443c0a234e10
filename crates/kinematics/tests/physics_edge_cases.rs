//! Edge cases and reference values for the closed-form models.

#![allow(clippy::float_cmp)]

use kinematics::{
    Body, ForceBalance, Launch, Oscillator, Point, STANDARD_GRAVITY, SlidingBlock, Vector, Walls,
    elastic_velocities, ratio_or, sign,
};

const TOLERANCE: f64 = 1e-2;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

// =============================================================================
// Reference values
// =============================================================================

#[test]
fn projectile_reference_launch() {
    let m = Launch::new(50.0, 45.0).metrics();
    assert!(close(m.time_of_flight, 7.21), "tof = {}", m.time_of_flight);
    assert!(close(m.range, 254.84), "range = {}", m.range);
    assert!(close(m.max_height, 63.71), "height = {}", m.max_height);
}

#[test]
fn newton_reference_block() {
    let f = ForceBalance::solve(10.0, 10.0, 0.5, STANDARD_GRAVITY);
    assert!(close(f.friction, 49.05));
    assert!(close(f.net, -39.05));
    assert!(close(f.acceleration, -3.905));
}

#[test]
fn harmonic_reference_spring() {
    let osc = Oscillator::new(2.0, 10.0, 100.0);
    assert!(close(osc.angular_frequency(), 2.236));
    assert!(close(osc.period(), 2.81));
    assert!(close(osc.frequency(), 0.356));
    assert!(close(osc.max_speed(), 223.6));
}

#[test]
fn collision_reference_pair() {
    let (v1, v2) = elastic_velocities(1.0, 50.0, 2.0, -20.0);
    assert!(close(v1, -130.0 / 3.0));
    // Momentum before and after: 1·50 + 2·(−20) = 10.
    assert!(close(v1 + 2.0 * v2, 10.0));
    assert!(close(v2, 26.67));
}

// =============================================================================
// Degenerate inputs
// =============================================================================

#[test]
fn zero_speed_launch_stays_put() {
    let launch = Launch::new(0.0, 60.0);
    assert_eq!(launch.time_of_flight(), 0.0);
    assert_eq!(launch.range(), 0.0);
    assert_eq!(launch.max_height(), 0.0);
    assert_eq!(launch.trajectory().samples(), &[Point::origin()]);
}

#[test]
fn nan_inputs_never_panic() {
    let launch = Launch::new(f64::NAN, 45.0);
    assert_eq!(launch.time_of_flight(), 0.0);
    assert!(launch.trajectory().len() <= 1);

    let f = ForceBalance::solve(f64::NAN, 1.0, 0.5, STANDARD_GRAVITY);
    assert!(!f.is_balanced());

    let osc = Oscillator::new(f64::NAN, 10.0, 50.0);
    assert_eq!(osc.angular_frequency(), 0.0);
}

#[test]
fn infinite_mass_collision_keeps_velocities() {
    assert_eq!(elastic_velocities(f64::INFINITY, 1.0, 2.0, -1.0), (1.0, -1.0));
}

#[test]
fn heavy_body_barely_moves() {
    let (v1, v2) = elastic_velocities(1000.0, 0.0, 1.0, 10.0);
    assert!(v1.abs() < 0.03);
    assert!(close(v2, -9.98));
}

#[test]
fn stationary_pair_stays_stationary() {
    assert_eq!(elastic_velocities(1.0, 0.0, 2.0, 0.0), (0.0, 0.0));
}

// =============================================================================
// Walls and bodies
// =============================================================================

#[test]
fn wall_touch_counts_as_bounce() {
    let walls = Walls::new(0.0, 800.0);
    let mut body = Body::new(1.0, 30.0, -5.0);
    assert!(walls.bounce(&mut body, 30.0));
    assert_eq!(body.velocity, 5.0);

    let mut body = Body::new(1.0, 770.0, 5.0);
    assert!(walls.bounce(&mut body, 30.0));
    assert_eq!(body.velocity, -5.0);
}

#[test]
fn two_bodies_approach_and_separate() {
    let walls = Walls::new(0.0, 800.0);
    let mut a = Body::new(1.0, 100.0, 50.0);
    let mut b = Body::new(2.0, 400.0, -20.0);
    let mut collided = false;

    for _ in 0..200 {
        a.advance(0.016, 20.0);
        b.advance(0.016, 20.0);
        walls.bounce(&mut a, 30.0);
        walls.bounce(&mut b, 30.0);
        if a.overlaps(&b, 30.0) {
            a.collide_elastic(&mut b);
            collided = true;
            break;
        }
    }

    assert!(collided);
    assert!(close(a.velocity, -130.0 / 3.0));
    assert!(close(b.velocity, 26.67));
}

#[test]
fn block_reverses_under_opposing_force() {
    let mut block = SlidingBlock::at_rest(270.0);
    block.step(5.0, 0.1, 60.0);
    assert!(block.velocity > 0.0);
    for _ in 0..20 {
        block.step(-5.0, 0.1, 60.0);
    }
    assert!(block.velocity < 0.0);
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn ratio_fallbacks() {
    assert_eq!(ratio_or(1.0, 0.0, 7.0), 7.0);
    assert_eq!(ratio_or(f64::INFINITY, 1.0, 7.0), 7.0);
    assert_eq!(ratio_or(6.0, 3.0, 7.0), 2.0);
}

#[test]
fn sign_of_zero_is_zero() {
    assert_eq!(sign(0.0), 0.0);
    assert_eq!(sign(-0.0), 0.0);
    assert_eq!(sign(-3.0), -1.0);
    assert_eq!(sign(2.0), 1.0);
}

#[test]
fn vector_geometry() {
    let v = Point::new(4.0, 5.0) - Point::new(1.0, 1.0);
    assert_eq!(v, Vector::new(3.0, 4.0));
    assert_eq!(v.magnitude(), 5.0);
}
