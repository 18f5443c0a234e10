//! Demo identifiers and the commands the UI sends to the core.

use serde::{Deserialize, Serialize};

/// The four demonstrations, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demo {
    /// Projectile motion over flat ground.
    #[default]
    Projectile,
    /// Newton's second law with kinetic friction.
    Newton,
    /// Mass on a spring.
    Harmonic,
    /// Two-body elastic collision.
    Collision,
}

impl Demo {
    /// Get the tab title for this demo.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Projectile => "Projectile Motion",
            Self::Newton => "Newton's Laws",
            Self::Harmonic => "Harmonic Motion",
            Self::Collision => "Collision & Momentum",
        }
    }

    /// Short lowercase identifier used on the command line and in config files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::Newton => "newton",
            Self::Harmonic => "harmonic",
            Self::Collision => "collision",
        }
    }

    /// Parse a slug, case-insensitively.
    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|demo| demo.slug().eq_ignore_ascii_case(s.trim()))
    }

    /// Get the keyboard shortcut for this demo (1-4).
    #[must_use]
    pub const fn shortcut(self) -> char {
        match self {
            Self::Projectile => '1',
            Self::Newton => '2',
            Self::Harmonic => '3',
            Self::Collision => '4',
        }
    }

    /// Get demo from keyboard shortcut.
    #[must_use]
    pub const fn from_shortcut(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Projectile),
            '2' => Some(Self::Newton),
            '3' => Some(Self::Harmonic),
            '4' => Some(Self::Collision),
            _ => None,
        }
    }

    /// Get all demos in tab order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Projectile, Self::Newton, Self::Harmonic, Self::Collision]
    }

    /// The tab after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Projectile => Self::Newton,
            Self::Newton => Self::Harmonic,
            Self::Harmonic => Self::Collision,
            Self::Collision => Self::Projectile,
        }
    }

    /// The tab before this one, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Projectile => Self::Collision,
            Self::Newton => Self::Projectile,
            Self::Harmonic => Self::Newton,
            Self::Collision => Self::Harmonic,
        }
    }

    /// Logical drawing-surface size `(width, height)` for this demo.
    #[must_use]
    pub const fn canvas_size(self) -> (f64, f64) {
        match self {
            Self::Projectile => (1200.0, 400.0),
            Self::Newton => (600.0, 200.0),
            Self::Harmonic => (700.0, 250.0),
            Self::Collision => (800.0, 200.0),
        }
    }
}

impl std::fmt::Display for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A request from the UI shell to the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the given demo's animation.
    Start(Demo),
    /// Reset the given demo to its defaults.
    Reset(Demo),
    /// Make another demo the visible tab.
    SwitchTab(Demo),
    /// A slider moved.
    SetParam(ParamChange),
}

/// A parameter adjustment reported by the parameter-input collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamChange {
    /// Demo that owns the parameter.
    pub demo: Demo,
    /// Field name, e.g. `"velocity"`.
    pub name: String,
    /// Requested value; clamped to the field's range on apply.
    pub value: f64,
}

impl ParamChange {
    /// Creates a parameter change.
    pub fn new(demo: Demo, name: impl Into<String>, value: f64) -> Self {
        Self {
            demo,
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_round_trip() {
        for demo in Demo::all() {
            assert_eq!(Demo::from_shortcut(demo.shortcut()), Some(demo));
        }
        assert_eq!(Demo::from_shortcut('9'), None);
    }

    #[test]
    fn slugs_parse_case_insensitively() {
        assert_eq!(Demo::from_slug("Harmonic"), Some(Demo::Harmonic));
        assert_eq!(Demo::from_slug(" newton "), Some(Demo::Newton));
        assert_eq!(Demo::from_slug("orbit"), None);
    }

    #[test]
    fn next_and_prev_cycle_through_all_tabs() {
        let mut demo = Demo::Projectile;
        for expected in [Demo::Newton, Demo::Harmonic, Demo::Collision, Demo::Projectile] {
            demo = demo.next();
            assert_eq!(demo, expected);
        }
        assert_eq!(Demo::Projectile.prev(), Demo::Collision);
        for demo in Demo::all() {
            assert_eq!(demo.next().prev(), demo);
        }
    }

    #[test]
    fn canvas_sizes() {
        assert_eq!(Demo::Projectile.canvas_size(), (1200.0, 400.0));
        assert_eq!(Demo::Newton.canvas_size(), (600.0, 200.0));
        assert_eq!(Demo::Harmonic.canvas_size(), (700.0, 250.0));
        assert_eq!(Demo::Collision.canvas_size(), (800.0, 200.0));
    }

    #[test]
    fn display_uses_tab_title() {
        assert_eq!(Demo::Collision.to_string(), "Collision & Momentum");
    }
}
