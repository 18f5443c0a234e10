//! Undamped simple harmonic motion of a mass on a spring.
//!
//! Positions are evaluated from the closed form `x(t) = A·cos(ω·t)`, so
//! sampling at arbitrary times never accumulates integration error.

use core::f64::consts::TAU;

use crate::ratio_or;

/// A mass on an ideal spring, released from rest at full amplitude.
///
/// # Example
///
/// ```rust
/// use kinematics::Oscillator;
///
/// let osc = Oscillator::new(2.0, 8.0, 100.0);
/// assert!((osc.angular_frequency() - 2.0).abs() < 1e-12);
/// assert!((osc.displacement(0.0) - 100.0).abs() < 1e-12);
/// assert!((osc.period() * osc.frequency() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    mass: f64,
    stiffness: f64,
    amplitude: f64,
}

impl Oscillator {
    /// Creates an oscillator.
    ///
    /// # Arguments
    ///
    /// * `mass` - Mass in kg
    /// * `stiffness` - Spring constant in N/m
    /// * `amplitude` - Peak displacement (any length unit)
    #[inline]
    pub const fn new(mass: f64, stiffness: f64, amplitude: f64) -> Self {
        Self {
            mass,
            stiffness,
            amplitude,
        }
    }

    /// Mass in kg.
    #[inline]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Spring constant in N/m.
    #[inline]
    pub const fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Peak displacement.
    #[inline]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// `ω = sqrt(k/m)` in rad/s. Zero when either input is non-positive.
    pub fn angular_frequency(&self) -> f64 {
        let ratio = ratio_or(self.stiffness, self.mass, 0.0);
        if ratio > 0.0 { ratio.sqrt() } else { 0.0 }
    }

    /// `2π/ω` in seconds. Zero for a motionless oscillator.
    pub fn period(&self) -> f64 {
        ratio_or(TAU, self.angular_frequency(), 0.0)
    }

    /// `1/period` in hertz. Zero for a motionless oscillator.
    pub fn frequency(&self) -> f64 {
        ratio_or(1.0, self.period(), 0.0)
    }

    /// `|ω·A|`, reached when passing through equilibrium.
    pub fn max_speed(&self) -> f64 {
        (self.angular_frequency() * self.amplitude).abs()
    }

    /// Displacement from equilibrium `t` seconds after release.
    #[inline]
    pub fn displacement(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency() * t).cos()
    }
}
