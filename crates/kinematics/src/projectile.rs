//! Closed-form projectile flight over flat ground.
//!
//! A [`Launch`] describes a projectile fired from the origin with a given
//! speed and elevation angle. Flight metrics come straight from the
//! kinematic equations; the [`Trajectory`] is the same curve sampled at a
//! fixed time interval for drawing.
//!
//! # Example
//!
//! ```rust
//! use kinematics::Launch;
//!
//! let launch = Launch::new(30.0, 60.0);
//! let apex_time = launch.time_of_flight() / 2.0;
//! let apex = launch.position_at(apex_time);
//!
//! assert!((apex.y - launch.max_height()).abs() < 1e-9);
//! ```

use crate::point::Point;
use crate::ratio_or;

/// Standard gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Time between consecutive [`Trajectory`] samples, in seconds.
pub const SAMPLE_INTERVAL: f64 = 0.01;

/// Upper bound on trajectory samples, reached only with non-physical inputs.
const MAX_SAMPLES: usize = 1_000_000;

/// Derived flight metrics for a [`Launch`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightMetrics {
    /// Seconds from launch until the projectile returns to ground level.
    pub time_of_flight: f64,
    /// Horizontal distance travelled, in meters.
    pub range: f64,
    /// Peak height above the launch point, in meters.
    pub max_height: f64,
}

/// Initial conditions of a projectile launched from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    speed: f64,
    angle_degrees: f64,
    gravity: f64,
}

impl Launch {
    /// Creates a launch under [`STANDARD_GRAVITY`].
    ///
    /// # Arguments
    ///
    /// * `speed` - Initial speed in m/s
    /// * `angle_degrees` - Elevation above the horizontal, in degrees
    #[inline]
    pub const fn new(speed: f64, angle_degrees: f64) -> Self {
        Self {
            speed,
            angle_degrees,
            gravity: STANDARD_GRAVITY,
        }
    }

    /// Replaces the gravitational acceleration (positive, pointing down).
    #[inline]
    pub const fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Initial speed in m/s.
    #[inline]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Elevation angle in degrees.
    #[inline]
    pub const fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Gravitational acceleration in m/s².
    #[inline]
    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Elevation angle in radians.
    #[inline]
    pub fn radians(&self) -> f64 {
        self.angle_degrees.to_radians()
    }

    /// Time until the projectile returns to launch height: `2·v·sin(θ)/g`.
    pub fn time_of_flight(&self) -> f64 {
        ratio_or(2.0 * self.speed * self.radians().sin(), self.gravity, 0.0)
    }

    /// Horizontal range: `v²·sin(2θ)/g`.
    pub fn range(&self) -> f64 {
        ratio_or(
            self.speed * self.speed * (2.0 * self.radians()).sin(),
            self.gravity,
            0.0,
        )
    }

    /// Peak height: `v²·sin²(θ)/(2g)`.
    pub fn max_height(&self) -> f64 {
        let sin = self.radians().sin();
        ratio_or(
            self.speed * self.speed * sin * sin,
            2.0 * self.gravity,
            0.0,
        )
    }

    /// All flight metrics at once.
    pub fn metrics(&self) -> FlightMetrics {
        FlightMetrics {
            time_of_flight: self.time_of_flight(),
            range: self.range(),
            max_height: self.max_height(),
        }
    }

    /// Analytic position `t` seconds after launch.
    ///
    /// Not clamped: for `t` past the time of flight the height is negative.
    pub fn position_at(&self, t: f64) -> Point {
        let (sin, cos) = self.radians().sin_cos();
        Point::new(
            self.speed * cos * t,
            self.speed * sin * t - 0.5 * self.gravity * t * t,
        )
    }

    /// Samples the flight every [`SAMPLE_INTERVAL`] seconds from launch to
    /// the time of flight, keeping only samples at or above ground level.
    pub fn trajectory(&self) -> Trajectory {
        let time_of_flight = self.time_of_flight();
        let mut samples = Vec::new();

        if time_of_flight.is_finite() && time_of_flight >= 0.0 {
            // Index-based stepping avoids drift from repeated addition.
            for i in 0..MAX_SAMPLES {
                let t = i as f64 * SAMPLE_INTERVAL;
                if t > time_of_flight {
                    break;
                }
                let p = self.position_at(t);
                if p.y >= 0.0 {
                    samples.push(p);
                }
            }
        }

        Trajectory {
            samples,
            time_of_flight,
        }
    }
}

/// An immutable, sampled projectile path.
///
/// Produced by [`Launch::trajectory`]; regenerate it rather than mutating it
/// when the launch changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Point>,
    time_of_flight: f64,
}

impl Trajectory {
    /// The sampled points, in flight order.
    #[inline]
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    /// Iterates over the sampled points.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Point> {
        self.samples.iter()
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of flight of the launch this path was sampled from.
    #[inline]
    pub const fn time_of_flight(&self) -> f64 {
        self.time_of_flight
    }

    /// Time covered by the samples.
    pub fn sampled_duration(&self) -> f64 {
        self.samples.len() as f64 * SAMPLE_INTERVAL
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Point;
    type IntoIter = core::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
