//! Drawing-surface abstraction.
//!
//! Simulations draw through [`DrawingSurface`], a small subset of a 2D canvas
//! API in logical pixels with the origin at the top-left corner and y
//! pointing down. Two implementations ship with the crate:
//!
//! - [`RecordingSurface`] keeps the list of operations since the last full
//!   clear, for tests and the headless self-check
//! - [`TerminalCanvas`](crate::canvas::TerminalCanvas) rasterizes into a
//!   character grid for the terminal front end

use kinematics::Point;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Trajectories, springs and the block.
    pub const GREEN: Self = Self::rgb(0x4c, 0xaf, 0x50);
    /// Projectile, harmonic mass, applied force.
    pub const RED: Self = Self::rgb(0xff, 0x44, 0x44);
    /// Friction force.
    pub const BLUE: Self = Self::rgb(0x44, 0x88, 0xff);
    /// Net force.
    pub const PURPLE: Self = Self::rgb(0xa0, 0x20, 0xf0);
    /// Labels and marker highlight.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Dark ground line.
    pub const DARK_GRAY: Self = Self::rgb(0x33, 0x33, 0x33);
    /// Light ground line.
    pub const GRAY: Self = Self::rgb(0x88, 0x88, 0x88);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fill style: a color plus an optional soft glow of another color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    /// Fill color.
    pub color: Color,
    /// Glow color, if any.
    pub glow: Option<Color>,
}

impl Paint {
    /// A plain fill.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self { color, glow: None }
    }

    /// A fill with a glow of `glow`.
    #[must_use]
    pub const fn glowing(color: Color, glow: Color) -> Self {
        Self {
            color,
            glow: Some(glow),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the position.
    #[default]
    Left,
    /// Text is centered on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// A 2D drawing target with a fixed logical size.
pub trait DrawingSurface {
    /// Creates a blank surface of the given logical size.
    fn with_size(width: f64, height: f64) -> Self
    where
        Self: Sized;

    /// Logical width.
    fn width(&self) -> f64;

    /// Logical height.
    fn height(&self) -> f64;

    /// Erases a rectangle.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Erases the whole surface.
    fn clear(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.clear_rect(0.0, 0.0, w, h);
    }

    /// Strokes the polyline through `points`.
    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64);

    /// Fills the polygon through `points`.
    fn fill_path(&mut self, points: &[Point], color: Color);

    /// Fills a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint);

    /// Fills an axis-aligned rectangle whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint);

    /// Draws a single line of text anchored at `at`.
    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color);

    /// Strokes a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f64) {
        self.stroke_path(&[from, to], color, line_width);
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A partial [`DrawingSurface::clear_rect`].
    ClearRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// A stroked polyline.
    StrokePath {
        /// Vertices.
        points: Vec<Point>,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        line_width: f64,
    },
    /// A filled polygon.
    FillPath {
        /// Vertices.
        points: Vec<Point>,
        /// Fill color.
        color: Color,
    },
    /// A filled disc.
    FillCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill style.
        paint: Paint,
    },
    /// A filled rectangle.
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill style.
        paint: Paint,
    },
    /// A line of text.
    FillText {
        /// Content.
        text: String,
        /// Anchor.
        at: Point,
        /// Alignment around the anchor.
        align: TextAlign,
        /// Text color.
        color: Color,
    },
}

/// A surface that remembers what was drawn since the last full clear.
///
/// # Example
///
/// ```rust
/// use kinematics::Point;
/// use physics_lab::{Color, DrawingSurface, RecordingSurface};
///
/// let mut surface = RecordingSurface::with_size(100.0, 50.0);
/// surface.stroke_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Color::GRAY, 2.0);
/// assert_eq!(surface.ops().len(), 1);
///
/// surface.clear();
/// assert!(surface.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
    clears: usize,
}

impl RecordingSurface {
    /// Operations drawn since the last full clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns `true` if nothing has been drawn since the last full clear.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of full clears so far.
    #[must_use]
    pub const fn clear_count(&self) -> usize {
        self.clears
    }

    /// Recorded filled circles, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Paint)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle {
                center,
                radius,
                paint,
            } => Some((*center, *radius, *paint)),
            _ => None,
        })
    }

    /// Recorded rectangles as `(x, y, width, height, paint)`, in draw order.
    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64, Paint)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                paint,
            } => Some((*x, *y, *width, *height, *paint)),
            _ => None,
        })
    }

    /// Recorded text, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn covers_everything(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
    }
}

impl DrawingSurface for RecordingSurface {
    fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            clears: 0,
        }
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if self.covers_everything(x, y, width, height) {
            self.ops.clear();
            self.clears += 1;
        } else {
            self.ops.push(DrawOp::ClearRect {
                x,
                y,
                width,
                height,
            });
        }
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        self.ops.push(DrawOp::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            paint,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            at,
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_clear_discards_ops() {
        let mut s = RecordingSurface::with_size(200.0, 100.0);
        s.fill_rect(10.0, 10.0, 5.0, 5.0, Color::GREEN.into());
        s.fill_circle(Point::new(50.0, 50.0), 8.0, Paint::solid(Color::RED));
        assert_eq!(s.ops().len(), 2);

        s.clear();
        assert!(s.is_blank());
        assert_eq!(s.clear_count(), 1);
    }

    #[test]
    fn partial_clear_is_recorded() {
        let mut s = RecordingSurface::with_size(200.0, 100.0);
        s.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(s.ops().len(), 1);
        assert_eq!(s.clear_count(), 0);
    }

    #[test]
    fn filters_pick_matching_ops() {
        let mut s = RecordingSurface::with_size(200.0, 100.0);
        s.fill_text("1 kg", Point::new(10.0, 10.0), TextAlign::Center, Color::WHITE);
        s.fill_circle(
            Point::new(1.0, 2.0),
            3.0,
            Paint::glowing(Color::RED, Color::RED),
        );
        s.fill_rect(1.0, 2.0, 3.0, 4.0, Color::GREEN.into());
        assert_eq!(s.texts().collect::<Vec<_>>(), vec!["1 kg"]);
        assert_eq!(s.circles().count(), 1);
        assert_eq!(s.rects().next().map(|r| r.3), Some(4.0));
    }

    #[test]
    fn stroke_line_records_two_point_path() {
        let mut s = RecordingSurface::with_size(10.0, 10.0);
        s.stroke_line(Point::new(0.0, 1.0), Point::new(2.0, 3.0), Color::GRAY, 3.0);
        match &s.ops()[0] {
            DrawOp::StrokePath {
                points, line_width, ..
            } => {
                assert_eq!(points.len(), 2);
                assert_eq!(*line_width, 3.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}
