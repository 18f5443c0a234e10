//! Named numeric parameters with ranges, and read-only metric readouts.
//!
//! Each demo declares a static table of [`ParamSpec`]s. A [`ParamSet`] holds
//! the current values for one demo, clamps every update into range and can
//! restore the documented defaults.

use crate::error::{Error, Result};
use crate::messages::Demo;

/// Declaration of one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Field name used by [`ParamChange`](crate::ParamChange).
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Unit suffix for display.
    pub unit: &'static str,
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
    /// Value after Reset.
    pub default: f64,
}

impl ParamSpec {
    /// Clamps `value` into `[min, max]`. Non-finite input yields the default.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// Moves `value` by `steps` slider increments and snaps to the grid.
    #[must_use]
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        let raw = value + f64::from(steps) * self.step;
        let snapped = self.min + ((raw - self.min) / self.step).round() * self.step;
        // Trim representation noise from repeated decimal steps.
        self.clamp((snapped * 1e6).round() / 1e6)
    }

    /// Decimal places needed to show a value on this slider's grid.
    #[must_use]
    pub fn decimals(&self) -> usize {
        if self.step >= 1.0 {
            0
        } else if self.step >= 0.1 {
            1
        } else {
            2
        }
    }

    /// Formats `value` with this slider's precision and unit.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{:.*} {}", self.decimals(), value, self.unit)
    }
}

/// Current values for one demo's sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    demo: Demo,
    specs: &'static [ParamSpec],
    values: Vec<f64>,
}

impl ParamSet {
    /// Creates a set holding every default.
    #[must_use]
    pub fn new(demo: Demo, specs: &'static [ParamSpec]) -> Self {
        Self {
            demo,
            specs,
            values: specs.iter().map(|spec| spec.default).collect(),
        }
    }

    /// The slider declarations, in display order.
    #[must_use]
    pub const fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }

    /// Value at `index` in declaration order.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.name == name)
    }

    /// Value of the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.values[i])
    }

    /// Sets a field, clamping into range. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] if the demo has no such field.
    pub fn set(&mut self, name: &str, value: f64) -> Result<f64> {
        let index = self.index_of(name).ok_or_else(|| Error::UnknownParameter {
            demo: self.demo.name(),
            name: name.to_string(),
        })?;
        let clamped = self.specs[index].clamp(value);
        self.values[index] = clamped;
        Ok(clamped)
    }

    /// Restores every default.
    pub fn reset(&mut self) {
        for (value, spec) in self.values.iter_mut().zip(self.specs) {
            *value = spec.default;
        }
    }

    /// Iterates over `(spec, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static ParamSpec, f64)> + '_ {
        self.specs.iter().zip(self.values.iter().copied())
    }
}

/// A read-only derived value shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    /// Display label.
    pub label: &'static str,
    /// Current value.
    pub value: f64,
    /// Unit suffix.
    pub unit: &'static str,
}

impl Metric {
    /// Creates a metric.
    #[must_use]
    pub const fn new(label: &'static str, value: f64, unit: &'static str) -> Self {
        Self { label, value, unit }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2} {}", self.label, self.value, self.unit)
    }
}
