//! Character-cell rasterizer for the terminal front end.
//!
//! [`TerminalCanvas`] maps a logical pixel surface onto a fixed grid of
//! cells. Terminal cells are roughly twice as tall as they are wide, so the
//! row count is halved to keep shapes close to their intended aspect.

use std::fmt::Write as _;

use crossterm::style::{self, Stylize};
use kinematics::Point;

use crate::surface::{Color, DrawingSurface, Paint, TextAlign};

/// Columns in every canvas.
pub const COLUMNS: usize = 96;
/// Smallest row count a canvas is given.
pub const MIN_ROWS: usize = 8;

/// Cell coordinates are clamped to this magnitude before line walking.
const CELL_LIMIT: f64 = 1024.0;

const THIN_STROKE: char = '·';
const STROKE: char = '•';
const THICK_STROKE: char = '█';
const FILL: char = '█';
const DISC: char = '●';
const POLYGON: char = '▲';
const GLOW: char = '░';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Option<Color>,
}

impl Cell {
    const BLANK: Self = Self {
        ch: ' ',
        color: None,
    };
}

/// A [`DrawingSurface`] that rasterizes into terminal cells.
///
/// # Example
///
/// ```rust
/// use kinematics::Point;
/// use physics_lab::{Color, DrawingSurface, TerminalCanvas};
///
/// let mut canvas = TerminalCanvas::with_size(800.0, 400.0);
/// canvas.stroke_line(Point::new(0.0, 200.0), Point::new(800.0, 200.0), Color::GRAY, 2.0);
/// assert!(canvas.ink() > 0);
/// assert_eq!(canvas.render(false).lines().count(), canvas.rows());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalCanvas {
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    /// Number of cell columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Glyph at a cell, if the cell exists.
    #[must_use]
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col].ch)
    }

    /// Number of non-blank cells.
    #[must_use]
    pub fn ink(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::BLANK).count()
    }

    /// Renders the grid as lines of text, optionally with 24-bit color.
    #[must_use]
    pub fn render(&self, use_color: bool) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2);
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if !use_color {
                out.extend(row.iter().map(|c| c.ch));
                continue;
            }
            // Consecutive cells of one color share a single escape sequence.
            let mut run = String::new();
            let mut run_color = None;
            for cell in row {
                if cell.color != run_color && !run.is_empty() {
                    push_run(&mut out, &run, run_color);
                    run.clear();
                }
                run_color = cell.color;
                run.push(cell.ch);
            }
            push_run(&mut out, &run, run_color);
        }
        out
    }

    fn cell_size(&self) -> (f64, f64) {
        (
            self.width / self.cols as f64,
            self.height / self.rows as f64,
        )
    }

    /// Cell containing a logical point, unclamped to the grid.
    fn cell_of(&self, p: Point) -> Option<(isize, isize)> {
        let (cw, ch) = self.cell_size();
        let col = (p.x / cw).floor();
        let row = (p.y / ch).floor();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }
        Some((to_index(col), to_index(row)))
    }

    /// Logical center of a cell.
    fn center_of(&self, col: usize, row: usize) -> Point {
        let (cw, ch) = self.cell_size();
        Point::new((col as f64 + 0.5) * cw, (row as f64 + 0.5) * ch)
    }

    /// Grid cells whose centers may fall within a logical bounding box.
    fn cells_within(
        &self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> impl Iterator<Item = (usize, usize)> + use<> {
        let cols = self.cols;
        let rows = self.rows;
        let span = self
            .cell_of(Point::new(left, top))
            .zip(self.cell_of(Point::new(right, bottom)));
        let (c0, r0, c1, r1) = span.map_or((1, 1, 0, 0), |((c0, r0), (c1, r1))| {
            (
                clamp_index(c0, cols),
                clamp_index(r0, rows),
                clamp_index(c1, cols),
                clamp_index(r1, rows),
            )
        });
        (r0..=r1)
            .filter(move |_| c0 <= c1)
            .flat_map(move |row| (c0..=c1).map(move |col| (col, row)))
    }

    fn plot(&mut self, col: isize, row: isize, ch: char, color: Color) {
        if let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) {
            self.set(col, row, ch, color);
        }
    }

    fn set(&mut self, col: usize, row: usize, ch: char, color: Color) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = Cell {
                ch,
                color: Some(color),
            };
        }
    }

    /// Bresenham walk between two cells.
    fn draw_line(&mut self, from: (isize, isize), to: (isize, isize), ch: char, color: Color) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f64, ch: char, color: Color) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }
        let cells: Vec<_> = self
            .cells_within(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )
            .filter(|&(col, row)| (self.center_of(col, row) - center).magnitude() <= radius)
            .collect();
        for (col, row) in cells {
            self.set(col, row, ch, color);
        }
        // A disc smaller than a cell still leaves a mark.
        if let Some((col, row)) = self.cell_of(center) {
            self.plot(col, row, ch, color);
        }
    }

    fn fill_box(&mut self, x: f64, y: f64, width: f64, height: f64, ch: char, color: Color) {
        let (left, right) = ordered(x, x + width);
        let (top, bottom) = ordered(y, y + height);
        let cells: Vec<_> = self
            .cells_within(left, top, right, bottom)
            .filter(|&(col, row)| {
                let c = self.center_of(col, row);
                c.x >= left && c.x <= right && c.y >= top && c.y <= bottom
            })
            .collect();
        for (col, row) in cells {
            self.set(col, row, ch, color);
        }
        if let Some((col, row)) = self.cell_of(Point::new(left, top)) {
            self.plot(col, row, ch, color);
        }
    }
}

impl DrawingSurface for TerminalCanvas {
    fn with_size(width: f64, height: f64) -> Self {
        let rows = grid_rows(width, height);
        Self {
            width,
            height,
            cols: COLUMNS,
            rows,
            cells: vec![Cell::BLANK; COLUMNS * rows],
        }
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (left, right) = ordered(x, x + width);
        let (top, bottom) = ordered(y, y + height);
        if left <= 0.0 && top <= 0.0 && right >= self.width && bottom >= self.height {
            self.cells.fill(Cell::BLANK);
            return;
        }
        let cells: Vec<_> = self
            .cells_within(left, top, right, bottom)
            .filter(|&(col, row)| {
                let c = self.center_of(col, row);
                c.x >= left && c.x <= right && c.y >= top && c.y <= bottom
            })
            .collect();
        for (col, row) in cells {
            self.cells[row * self.cols + col] = Cell::BLANK;
        }
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        let ch = if line_width >= 5.0 {
            THICK_STROKE
        } else if line_width >= 2.5 {
            STROKE
        } else {
            THIN_STROKE
        };
        let cells: Vec<_> = points.iter().filter_map(|p| self.cell_of(*p)).collect();
        match cells.as_slice() {
            [] => {}
            [only] => self.plot(only.0, only.1, ch, color),
            _ => {
                for pair in cells.windows(2) {
                    self.draw_line(pair[0], pair[1], ch, color);
                }
            }
        }
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            self.stroke_path(points, color, 1.0);
            return;
        }
        let (mut left, mut top) = (f64::INFINITY, f64::INFINITY);
        let (mut right, mut bottom) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            left = left.min(p.x);
            right = right.max(p.x);
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        let inside: Vec<_> = self
            .cells_within(left, top, right, bottom)
            .filter(|&(col, row)| contains(points, self.center_of(col, row)))
            .collect();
        for (col, row) in inside {
            self.set(col, row, POLYGON, color);
        }
        // Thin polygons still show their outline.
        let mut outline = points.to_vec();
        outline.push(points[0]);
        let cells: Vec<_> = outline.iter().filter_map(|p| self.cell_of(*p)).collect();
        for pair in cells.windows(2) {
            self.draw_line(pair[0], pair[1], POLYGON, color);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        if let Some(glow) = paint.glow {
            self.fill_disc(center, radius * 1.6, GLOW, glow);
        }
        self.fill_disc(center, radius, DISC, paint.color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        if let Some(glow) = paint.glow {
            let (cw, ch) = self.cell_size();
            self.fill_box(x - cw, y - ch, width + 2.0 * cw, height + 2.0 * ch, GLOW, glow);
        }
        self.fill_box(x, y, width, height, FILL, paint.color);
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color) {
        let Some((col, row)) = self.cell_of(at) else {
            return;
        };
        let len = isize::try_from(text.chars().count()).unwrap_or(isize::MAX);
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col.saturating_sub(len / 2),
            TextAlign::Right => col.saturating_sub(len),
        };
        for (offset, ch) in (0..).zip(text.chars()) {
            self.plot(start.saturating_add(offset), row, ch, color);
        }
    }
}

fn push_run(out: &mut String, run: &str, color: Option<Color>) {
    match color {
        Some(Color { r, g, b }) => {
            let _ = write!(out, "{}", run.with(style::Color::Rgb { r, g, b }));
        }
        None => out.push_str(run),
    }
}

fn grid_rows(width: f64, height: f64) -> usize {
    let rows = (COLUMNS as f64 * height / width / 2.0).round();
    if rows.is_finite() && rows > MIN_ROWS as f64 {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rows is finite, positive and bounded by CELL_LIMIT"
        )]
        let rows = rows.min(CELL_LIMIT) as usize;
        rows
    } else {
        MIN_ROWS
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to CELL_LIMIT first"
)]
fn to_index(value: f64) -> isize {
    value.clamp(-CELL_LIMIT, CELL_LIMIT) as isize
}

fn clamp_index(value: isize, len: usize) -> usize {
    usize::try_from(value).map_or(0, |v| v.min(len.saturating_sub(1)))
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Even-odd point-in-polygon test.
fn contains(polygon: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
