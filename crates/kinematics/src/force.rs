//! Newton's second law for a block on a rough, level track.

use crate::ratio_or;

/// Net forces below this magnitude (in newtons) count as balanced.
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Forces acting on a block, solved once from its inputs.
///
/// Friction here is the full kinetic friction `μ·m·g` regardless of whether
/// the block moves; the net force is the applied force minus that magnitude.
///
/// # Example
///
/// ```rust
/// use kinematics::{ForceBalance, STANDARD_GRAVITY};
///
/// let forces = ForceBalance::solve(10.0, 10.0, 0.5, STANDARD_GRAVITY);
/// assert!((forces.friction - 49.05).abs() < 1e-9);
/// assert!((forces.net + 39.05).abs() < 1e-9);
/// assert!((forces.acceleration + 3.905).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceBalance {
    /// Applied force in newtons (signed, +x to the right).
    pub applied: f64,
    /// Friction magnitude `μ·m·g` in newtons.
    pub friction: f64,
    /// `applied − friction`, in newtons.
    pub net: f64,
    /// `net / mass`, in m/s². Zero when the mass is zero.
    pub acceleration: f64,
}

impl ForceBalance {
    /// Solves the force balance for the given inputs.
    pub fn solve(applied: f64, mass: f64, friction_coefficient: f64, gravity: f64) -> Self {
        let friction = friction_coefficient * mass * gravity;
        let net = applied - friction;
        Self {
            applied,
            friction,
            net,
            acceleration: ratio_or(net, mass, 0.0),
        }
    }

    /// Returns `true` when the net force is negligible.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.net.abs() < BALANCE_TOLERANCE
    }
}

/// Position and velocity of a block integrated with symplectic Euler.
///
/// Velocity is advanced first and the new velocity moves the block, which
/// keeps the scheme stable at a fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlidingBlock {
    /// Position along the track, in the caller's units.
    pub position: f64,
    /// Velocity in m/s.
    pub velocity: f64,
}

impl SlidingBlock {
    /// Creates a block at rest at `position`.
    #[inline]
    pub const fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Advances the block by one step.
    ///
    /// # Arguments
    ///
    /// * `acceleration` - Acceleration in m/s²
    /// * `delta_time` - Step length in seconds
    /// * `scale` - Track units per meter applied to the displacement
    ///
    /// Returns the new position.
    #[inline]
    pub fn step(&mut self, acceleration: f64, delta_time: f64, scale: f64) -> f64 {
        self.velocity += acceleration * delta_time;
        self.position += self.velocity * scale * delta_time;
        self.position
    }
}
