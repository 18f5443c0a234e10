#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

//! # Kinematics
//!
//! Small, deterministic physics models for classical-mechanics demonstrations.
//!
//! Kinematics provides:
//! - **Launch**: closed-form projectile flight (time of flight, range, apex)
//!   and a sampled [`Trajectory`]
//! - **ForceBalance** / **SlidingBlock**: Newton's second law with kinetic
//!   friction, integrated with symplectic Euler at a fixed step
//! - **Oscillator**: undamped simple harmonic motion sampled analytically
//! - **Body** / **Walls**: 1-D free flight with elastic wall bounces and
//!   two-body elastic collision resolution
//!
//! Every formula guards its denominators. Degenerate inputs (zero mass, zero
//! range, zero stiffness) produce finite fallbacks instead of NaN or infinity,
//! so the results can flow straight into drawing coordinates.
//!
//! ## Projectile Example
//!
//! ```rust
//! use kinematics::Launch;
//!
//! let launch = Launch::new(50.0, 45.0);
//! let flight = launch.metrics();
//!
//! assert!((flight.range - 254.84).abs() < 0.01);
//!
//! let trajectory = launch.trajectory();
//! assert!(trajectory.iter().all(|p| p.y >= 0.0));
//! ```
//!
//! ## Collision Example
//!
//! ```rust
//! use kinematics::elastic_velocities;
//!
//! let (v1, v2) = elastic_velocities(1.0, 50.0, 2.0, -20.0);
//! assert!((v1 + 130.0 / 3.0).abs() < 1e-9);
//! assert!((v2 - 26.666_666).abs() < 1e-3);
//! ```

mod collision;
mod force;
mod oscillator;
mod point;
mod projectile;

pub use collision::{Body, Walls, elastic_velocities, kinetic_energy, momentum};
pub use force::{BALANCE_TOLERANCE, ForceBalance, SlidingBlock};
pub use oscillator::Oscillator;
pub use point::{Point, Vector};
pub use projectile::{FlightMetrics, Launch, SAMPLE_INTERVAL, STANDARD_GRAVITY, Trajectory};

/// Divides `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or the quotient is not finite.
///
/// # Example
///
/// ```rust
/// use kinematics::ratio_or;
///
/// assert_eq!(ratio_or(10.0, 4.0, 0.0), 2.5);
/// assert_eq!(ratio_or(10.0, 0.0, 0.0), 0.0);
/// ```
#[inline]
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() { quotient } else { fallback }
}

/// Sign function with `sign(0) == 0`.
///
/// [`f64::signum`] returns `1.0` for `+0.0`; the force diagrams need a zero
/// net force to produce a zero-length friction arrow.
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::collision::{Body, Walls, elastic_velocities, kinetic_energy, momentum};
    pub use crate::force::{ForceBalance, SlidingBlock};
    pub use crate::oscillator::Oscillator;
    pub use crate::point::{Point, Vector};
    pub use crate::projectile::{FlightMetrics, Launch, STANDARD_GRAVITY, Trajectory};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_or_guards_zero_denominator() {
        assert_eq!(ratio_or(1.0, 0.0, 7.0), 7.0);
        assert_eq!(ratio_or(0.0, 0.0, 7.0), 7.0);
        assert_eq!(ratio_or(9.0, 3.0, 7.0), 3.0);
    }

    #[test]
    fn ratio_or_guards_overflow() {
        assert_eq!(ratio_or(f64::MAX, 1e-300, -1.0), -1.0);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
