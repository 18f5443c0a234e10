#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]

use kinematics::{
    Body, ForceBalance, Launch, Oscillator, SAMPLE_INTERVAL, STANDARD_GRAVITY, SlidingBlock,
    elastic_velocities, kinetic_energy, momentum,
};
use proptest::prelude::*;

// =============================================================================
// Projectile properties
// =============================================================================

proptest! {
    #[test]
    fn range_peaks_at_45_degrees(
        speed in 10.0f64..100.0,
        angle in 0.0f64..90.0,
    ) {
        let best = Launch::new(speed, 45.0).range();
        let range = Launch::new(speed, angle).range();
        prop_assert!(
            range <= best + 1e-9,
            "range at {}° ({}) exceeded range at 45° ({})",
            angle, range, best
        );
    }

    #[test]
    fn range_grid_peaks_at_45_degrees(speed in 10u32..=100) {
        let speed = f64::from(speed);
        let (best_angle, _) = (0..=90)
            .map(|deg| (deg, Launch::new(speed, f64::from(deg)).range()))
            .fold((0, f64::MIN), |acc, (deg, r)| if r > acc.1 { (deg, r) } else { acc });
        prop_assert_eq!(best_angle, 45);
    }

    #[test]
    fn trajectory_stays_above_ground_and_covers_flight(
        speed in 10.0f64..100.0,
        angle in 0.0f64..=90.0,
    ) {
        let trajectory = Launch::new(speed, angle).trajectory();
        prop_assert!(!trajectory.is_empty());
        for p in &trajectory {
            prop_assert!(p.y >= 0.0, "sample below ground: {:?}", p);
        }
        prop_assert!(
            trajectory.len() as f64 * SAMPLE_INTERVAL
                >= trajectory.time_of_flight() - SAMPLE_INTERVAL - 1e-9,
            "{} samples do not cover {} s",
            trajectory.len(),
            trajectory.time_of_flight()
        );
    }

    #[test]
    fn trajectory_ends_within_flight_time(
        speed in 10.0f64..100.0,
        angle in 0.0f64..=90.0,
    ) {
        let trajectory = Launch::new(speed, angle).trajectory();
        let last_time = (trajectory.len() - 1) as f64 * SAMPLE_INTERVAL;
        prop_assert!(last_time <= trajectory.time_of_flight() + 1e-9);
    }

    #[test]
    fn metrics_are_finite_and_non_negative(
        speed in 0.0f64..200.0,
        angle in 0.0f64..=90.0,
    ) {
        let m = Launch::new(speed, angle).metrics();
        prop_assert!(m.time_of_flight.is_finite() && m.time_of_flight >= 0.0);
        prop_assert!(m.range.is_finite() && m.range >= -1e-9);
        prop_assert!(m.max_height.is_finite() && m.max_height >= 0.0);
    }
}

// =============================================================================
// Force balance properties
// =============================================================================

proptest! {
    #[test]
    fn acceleration_matches_second_law(
        applied in -50.0f64..50.0,
        mass in 1.0f64..20.0,
        mu in 0.0f64..1.0,
    ) {
        let f = ForceBalance::solve(applied, mass, mu, STANDARD_GRAVITY);
        prop_assert!((f.friction - mu * mass * STANDARD_GRAVITY).abs() < 1e-9);
        prop_assert!((f.net - (applied - f.friction)).abs() < 1e-9);
        prop_assert!((f.acceleration * mass - f.net).abs() < 1e-9);
    }

    #[test]
    fn block_velocity_grows_linearly(
        acceleration in -10.0f64..10.0,
        steps in 1usize..500,
    ) {
        let mut block = SlidingBlock::at_rest(0.0);
        for _ in 0..steps {
            block.step(acceleration, 0.016, 60.0);
        }
        let expected = acceleration * 0.016 * steps as f64;
        prop_assert!((block.velocity - expected).abs() < 1e-9);
    }
}

// =============================================================================
// Oscillator properties
// =============================================================================

proptest! {
    #[test]
    fn period_times_frequency_is_one(
        mass in 0.5f64..10.0,
        stiffness in 1.0f64..50.0,
        amplitude in 20.0f64..250.0,
    ) {
        let osc = Oscillator::new(mass, stiffness, amplitude);
        prop_assert!((osc.period() * osc.frequency() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_speed_is_omega_times_amplitude(
        mass in 0.5f64..10.0,
        stiffness in 1.0f64..50.0,
        amplitude in 20.0f64..250.0,
    ) {
        let osc = Oscillator::new(mass, stiffness, amplitude);
        prop_assert_eq!(osc.max_speed(), osc.angular_frequency() * amplitude);
    }

    #[test]
    fn displacement_bounded_by_amplitude(
        mass in 0.5f64..10.0,
        stiffness in 1.0f64..50.0,
        amplitude in 20.0f64..250.0,
        t in 0.0f64..1000.0,
    ) {
        let osc = Oscillator::new(mass, stiffness, amplitude);
        prop_assert!(osc.displacement(t).abs() <= amplitude + 1e-9);
    }
}

// =============================================================================
// Collision properties
// =============================================================================

proptest! {
    #[test]
    fn elastic_collision_conserves_momentum(
        m1 in 1.0f64..10.0,
        m2 in 1.0f64..10.0,
        v1 in -100.0f64..100.0,
        v2 in -100.0f64..100.0,
    ) {
        let (a, b) = elastic_velocities(m1, v1, m2, v2);
        let before = momentum(m1, v1) + momentum(m2, v2);
        let after = momentum(m1, a) + momentum(m2, b);
        prop_assert!((before - after).abs() < 1e-9 * before.abs().max(1.0));
    }

    #[test]
    fn elastic_collision_conserves_energy(
        m1 in 1.0f64..10.0,
        m2 in 1.0f64..10.0,
        v1 in -100.0f64..100.0,
        v2 in -100.0f64..100.0,
    ) {
        let (a, b) = elastic_velocities(m1, v1, m2, v2);
        let before = kinetic_energy(m1, v1) + kinetic_energy(m2, v2);
        let after = kinetic_energy(m1, a) + kinetic_energy(m2, b);
        prop_assert!((before - after).abs() < 1e-9 * before.max(1.0));
    }

    #[test]
    fn relative_velocity_reverses(
        m1 in 1.0f64..10.0,
        m2 in 1.0f64..10.0,
        v1 in -100.0f64..100.0,
        v2 in -100.0f64..100.0,
    ) {
        let (a, b) = elastic_velocities(m1, v1, m2, v2);
        prop_assert!(((a - b) + (v1 - v2)).abs() < 1e-9 * (v1 - v2).abs().max(1.0));
    }

    #[test]
    fn collide_elastic_leaves_positions(
        p1 in 0.0f64..800.0,
        p2 in 0.0f64..800.0,
        v1 in -100.0f64..100.0,
        v2 in -100.0f64..100.0,
    ) {
        let mut a = Body::new(2.0, p1, v1);
        let mut b = Body::new(3.0, p2, v2);
        a.collide_elastic(&mut b);
        prop_assert_eq!(a.position, p1);
        prop_assert_eq!(b.position, p2);
    }
}
