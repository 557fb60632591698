//! Planar geometry kernel.
//!
//! Integer pixel points, segments, rectangles and polygons, plus the pure
//! helper functions the clippers are built from: unit vectors, inward edge
//! normals, side-of-ray tests, line-line intersection and winding
//! normalization. Nothing here owns state or touches a surface.
//!
//! Orientation tests use the usual mathematical convention (y grows upward):
//! a counter-clockwise polygon has its interior on the left of every edge.
//!
//! Continuous clipping math runs in `f64` ([`DVec2`]) so that any pair of
//! `i32` endpoints is represented exactly.

use crate::math::{dvec2::DVec2, vec2::Vec2};

/// An integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    /// Rounds a continuous point to the nearest pixel, halves away from zero.
    /// Values beyond the `i32` range saturate.
    pub fn round_from(v: impl Into<DVec2>) -> Self {
        let v = v.into();
        Self::new(v.x.round() as i32, v.y.round() as i32)
    }
}

impl From<(i32, i32)> for Point2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered pair of endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Horizontal extent, widened so that no pair of endpoints overflows.
    pub fn dx(&self) -> i64 {
        self.end.x as i64 - self.start.x as i64
    }

    pub fn dy(&self) -> i64 {
        self.end.y as i64 - self.start.y as i64
    }

    /// Direction vector `end - start`.
    pub fn direction(&self) -> DVec2 {
        self.end.to_dvec2() - self.start.to_dvec2()
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Evaluates `P(t) = start + t * (end - start)`.
    pub fn at(&self, t: f64) -> DVec2 {
        self.start.to_dvec2() + self.direction() * t
    }

    /// `P(t)` snapped to the nearest pixel. For `t` in `[0, 1]` the result
    /// lies within the bounding box of the segment.
    pub fn at_rounded(&self, t: f64) -> Point2 {
        Point2::round_from(self.at(t))
    }
}

/// An axis-aligned rectangle with inclusive integer bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    /// Builds a rectangle; bounds given in either order are sorted.
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min: x_min.min(x_max),
            x_max: x_min.max(x_max),
            y_min: y_min.min(y_max),
            y_max: y_min.max(y_max),
        }
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// The four sides as segments: left, right, bottom, top.
    pub fn sides(&self) -> [Segment; 4] {
        [
            Segment::from_coords(self.x_min, self.y_min, self.x_min, self.y_max),
            Segment::from_coords(self.x_max, self.y_min, self.x_max, self.y_max),
            Segment::from_coords(self.x_min, self.y_min, self.x_max, self.y_min),
            Segment::from_coords(self.x_min, self.y_max, self.x_max, self.y_max),
        ]
    }
}

/// A closed polygon; the last vertex connects back to the first.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Polygon {
    pub vertices: Vec<Point2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges as `(previous, current)` vertex pairs, starting with the
    /// closing edge from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[(i + n - 1) % n], self.vertices[i]))
    }

    /// Mean of the vertices, `None` for an empty polygon.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(DVec2::ZERO, |acc, p| acc + p.to_dvec2());
        Some(sum * (1.0 / self.vertices.len() as f64))
    }

    /// Returns a copy wound counter-clockwise.
    ///
    /// The orientation is read from the first edge: if the centroid lies to
    /// its right, the vertex order is reversed.
    pub fn to_counter_clockwise(&self) -> Polygon {
        let Some(center) = self.centroid() else {
            return self.clone();
        };
        if self.vertices.len() >= 2
            && is_right_of(
                self.vertices[0].to_dvec2(),
                self.vertices[1].to_dvec2(),
                center,
            )
        {
            let mut vertices = self.vertices.clone();
            vertices.reverse();
            Polygon::new(vertices)
        } else {
            self.clone()
        }
    }
}

impl From<Vec<(i32, i32)>> for Polygon {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self::new(points.into_iter().map(Point2::from).collect())
    }
}

/// Signed side of `p` relative to the ray `a -> b`:
/// positive = right, negative = left, zero = on the line.
#[inline]
pub fn side_of_ray(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// True when `p` lies strictly to the right of the ray `a -> b`.
#[inline]
pub fn is_right_of(a: DVec2, b: DVec2, p: DVec2) -> bool {
    (p - a).cross(b - a) > 0.0
}

/// Unit direction from `a` to `b`, `None` when the points coincide.
pub fn unit_vector(a: DVec2, b: DVec2) -> Option<DVec2> {
    (b - a).normalize()
}

/// Unit normal of edge `a -> b` oriented toward `toward`.
///
/// Returns `None` for a zero-length edge.
pub fn inward_normal(a: DVec2, b: DVec2, toward: DVec2) -> Option<DVec2> {
    let normal = unit_vector(a, b)?.perpendicular();
    if normal.dot(toward - a) > 0.0 {
        Some(normal)
    } else {
        Some(-normal)
    }
}

/// Parameter `t` along line `p0 + t * d` where it meets line `q0 + u * e`.
///
/// Returns `None` when the lines are parallel (or either direction is zero).
pub fn intersection_parameter(p0: DVec2, d: DVec2, q0: DVec2, e: DVec2) -> Option<f64> {
    let denom = d.cross(e);
    if denom.abs() <= f64::EPSILON {
        return None;
    }
    Some((q0 - p0).cross(e) / denom)
}

/// Intersection point of the infinite lines through two segments.
pub fn line_intersection(first: &Segment, second: &Segment) -> Option<DVec2> {
    let t = intersection_parameter(
        first.start.to_dvec2(),
        first.direction(),
        second.start.to_dvec2(),
        second.direction(),
    )?;
    Some(first.at(t))
}
