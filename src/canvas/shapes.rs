//! Axis-aligned shapes for canvas drawing

use std::cmp;

/// Canvas point with 1-based integer coordinates
///
/// Points are not bound to the canvas: anything outside `[1, width] x [1, height]`
/// is clipped away when the shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Shape trait for drawable outlines
pub trait Shape {
    /// Segments making up the outline, as pairs of endpoints
    fn segments(&self) -> Vec<(Point, Point)>;

    /// Color of the outline, `None` for the canvas stroke color
    fn color(&self) -> Option<char>;
}

/// Line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub color: Option<char>,
}

impl Line {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: char) -> Self {
        self.color = Some(color);
        self
    }

    /// Horizontal, vertical or a single point
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        is_axis_aligned(self.start, self.end)
    }
}

impl Shape for Line {
    fn segments(&self) -> Vec<(Point, Point)> {
        vec![(self.start, self.end)]
    }

    fn color(&self) -> Option<char> {
        self.color
    }
}

/// Rectangle outline given by two opposite corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub corner: Point,
    pub opposite: Point,
    pub color: Option<char>,
}

impl Rect {
    pub fn new(corner: impl Into<Point>, opposite: impl Into<Point>) -> Self {
        Self {
            corner: corner.into(),
            opposite: opposite.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: char) -> Self {
        self.color = Some(color);
        self
    }
}

impl Shape for Rect {
    fn segments(&self) -> Vec<(Point, Point)> {
        let Point { x: x1, y: y1 } = self.corner;
        let Point { x: x2, y: y2 } = self.opposite;
        vec![
            (Point::new(x1, y1), Point::new(x2, y1)),
            (Point::new(x1, y2), Point::new(x2, y2)),
            (Point::new(x1, y1), Point::new(x1, y2)),
            (Point::new(x2, y1), Point::new(x2, y2)),
        ]
    }

    fn color(&self) -> Option<char> {
        self.color
    }
}

#[inline]
pub(crate) fn is_axis_aligned(start: Point, end: Point) -> bool {
    start.x == end.x || start.y == end.y
}

/// Intersect the 1-based interval between `a` and `b` with `[1, limit]`
///
/// Returns the 0-based inclusive bounds of what is left, in any endpoint order.
pub fn clip_span(a: i32, b: i32, limit: i32) -> Option<(u32, u32)> {
    let lo = cmp::max(cmp::min(a, b), 1);
    let hi = cmp::min(cmp::max(a, b), limit);
    if lo > hi {
        return None;
    }
    // lo >= 1 here, so both values are non-negative after the shift
    Some(((lo - 1) as u32, (hi - 1) as u32))
}

/// 0-based index of a 1-based coordinate, if it lies within `[1, limit]`
pub fn clip_point(a: i32, limit: i32) -> Option<u32> {
    clip_span(a, a, limit).map(|(index, _)| index)
}
