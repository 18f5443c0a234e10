//! One-dimensional free flight, wall bounces and elastic collisions.

/// Momentum `m·v`.
#[inline]
pub fn momentum(mass: f64, velocity: f64) -> f64 {
    mass * velocity
}

/// Kinetic energy `½·m·v²`.
#[inline]
pub fn kinetic_energy(mass: f64, velocity: f64) -> f64 {
    0.5 * mass * velocity * velocity
}

/// Post-collision velocities of two bodies in a perfectly elastic 1-D
/// collision:
///
/// ```text
/// v1' = ((m1 − m2)·v1 + 2·m2·v2) / (m1 + m2)
/// v2' = ((m2 − m1)·v2 + 2·m1·v1) / (m1 + m2)
/// ```
///
/// When the total mass is zero the velocities are returned unchanged.
///
/// # Example
///
/// ```rust
/// use kinematics::elastic_velocities;
///
/// // Equal masses swap velocities.
/// let (a, b) = elastic_velocities(3.0, 10.0, 3.0, -4.0);
/// assert!((a + 4.0).abs() < 1e-12);
/// assert!((b - 10.0).abs() < 1e-12);
/// ```
pub fn elastic_velocities(m1: f64, v1: f64, m2: f64, v2: f64) -> (f64, f64) {
    let total = m1 + m2;
    if total == 0.0 || !total.is_finite() {
        return (v1, v2);
    }
    (
        ((m1 - m2) * v1 + 2.0 * m2 * v2) / total,
        ((m2 - m1) * v2 + 2.0 * m1 * v1) / total,
    )
}

/// A body moving along a line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    /// Mass in kg.
    pub mass: f64,
    /// Position along the line, in the caller's units.
    pub position: f64,
    /// Velocity in m/s.
    pub velocity: f64,
}

impl Body {
    /// Creates a body.
    #[inline]
    pub const fn new(mass: f64, position: f64, velocity: f64) -> Self {
        Self {
            mass,
            position,
            velocity,
        }
    }

    /// Moves the body by `velocity · delta_time · scale`.
    #[inline]
    pub fn advance(&mut self, delta_time: f64, scale: f64) {
        self.position += self.velocity * delta_time * scale;
    }

    /// Momentum of this body.
    #[inline]
    pub fn momentum(&self) -> f64 {
        momentum(self.mass, self.velocity)
    }

    /// Kinetic energy of this body.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        kinetic_energy(self.mass, self.velocity)
    }

    /// Returns `true` if two discs of `radius` centered on the bodies overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self, radius: f64) -> bool {
        (self.position - other.position).abs() < radius * 2.0
    }

    /// Replaces both velocities with their elastic-collision outcome.
    ///
    /// Positions are left untouched, so overlapping bodies may still overlap
    /// on the next step.
    pub fn collide_elastic(&mut self, other: &mut Self) {
        let (v1, v2) = elastic_velocities(self.mass, self.velocity, other.mass, other.velocity);
        self.velocity = v1;
        other.velocity = v2;
    }
}

/// Two parallel walls bounding the line of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walls {
    /// Left wall position.
    pub min: f64,
    /// Right wall position.
    pub max: f64,
}

impl Walls {
    /// Creates walls at `min` and `max`.
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reflects a disc of `radius` that touches or crosses a wall.
    ///
    /// The body is clamped back to the wall and its velocity negated.
    /// Returns `true` if a bounce happened.
    pub fn bounce(&self, body: &mut Body, radius: f64) -> bool {
        if body.position <= self.min + radius {
            body.position = self.min + radius;
            body.velocity = -body.velocity;
            true
        } else if body.position >= self.max - radius {
            body.position = self.max - radius;
            body.velocity = -body.velocity;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-3;

    #[test]
    fn test_reference_collision() {
        let (v1, v2) = elastic_velocities(1.0, 50.0, 2.0, -20.0);
        assert!((v1 - -130.0 / 3.0).abs() < TOLERANCE);
        assert!((v2 - 26.6667).abs() < TOLERANCE);
    }

    #[test]
    fn test_collision_conserves_momentum_and_energy() {
        let mut a = Body::new(1.5, 100.0, 40.0);
        let mut b = Body::new(4.0, 150.0, -10.0);
        let p0 = a.momentum() + b.momentum();
        let e0 = a.kinetic_energy() + b.kinetic_energy();
        a.collide_elastic(&mut b);
        assert!((a.momentum() + b.momentum() - p0).abs() < 1e-9);
        assert!((a.kinetic_energy() + b.kinetic_energy() - e0).abs() < 1e-9);
        // Positions are untouched.
        assert_eq!(a.position, 100.0);
        assert_eq!(b.position, 150.0);
    }

    #[test]
    fn test_zero_total_mass_keeps_velocities() {
        assert_eq!(elastic_velocities(0.0, 5.0, 0.0, -5.0), (5.0, -5.0));
    }

    #[test]
    fn test_overlap_threshold() {
        let a = Body::new(1.0, 100.0, 0.0);
        assert!(a.overlaps(&Body::new(1.0, 159.9, 0.0), 30.0));
        assert!(!a.overlaps(&Body::new(1.0, 160.0, 0.0), 30.0));
    }

    #[test]
    fn test_wall_bounce_clamps_and_reflects() {
        let walls = Walls::new(0.0, 800.0);
        let mut body = Body::new(1.0, 12.0, -30.0);
        assert!(walls.bounce(&mut body, 30.0));
        assert_eq!(body.position, 30.0);
        assert_eq!(body.velocity, 30.0);

        let mut body = Body::new(1.0, 790.0, 10.0);
        assert!(walls.bounce(&mut body, 30.0));
        assert_eq!(body.position, 770.0);
        assert_eq!(body.velocity, -10.0);

        let mut body = Body::new(1.0, 400.0, 10.0);
        assert!(!walls.bounce(&mut body, 30.0));
        assert_eq!(body.velocity, 10.0);
    }

    #[test]
    fn test_advance_scales_displacement() {
        let mut body = Body::new(1.0, 100.0, 50.0);
        body.advance(0.1, 20.0);
        assert!((body.position - 200.0).abs() < 1e-9);
    }
}
