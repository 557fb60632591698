//! Per-face plane equations and point-in-triangle tests.
//!
//! # Plane
//!
//! For a face through `p0`, `p1`, `p2` the normal `(a, b, c)` is the cross
//! product of the two edge vectors leaving `p0`, which is the cofactor
//! expansion of
//!
//! ```text
//! | x - x0   y - y0   z - z0 |
//! | x1 - x0  y1 - y0  z1 - z0 | = 0
//! | x2 - x0  y2 - y0  z2 - z0 |
//! ```
//!
//! and `d = -(a·x0 + b·y0 + c·z0)`. Solving `a·x + b·y + c·z + d = 0` for `z`
//! gives the depth at a screen position. A face with `c ≈ 0` is either
//! collinear or seen edge-on and has no such depth.
//!
//! # Edge test
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! A point is inside when the three edge values agree in sign, which holds
//! for both windings.

use super::VisibilityError;
use crate::geometry::side_of_ray;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Plane {
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Result<Self, VisibilityError> {
        let normal = (p1 - p0).cross(p2 - p0);
        if normal.z.abs() < f32::EPSILON {
            return Err(VisibilityError::DegenerateFace);
        }
        Ok(Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(p0),
        })
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }

    /// Depth of the plane above screen position `(x, y)`.
    #[inline]
    pub fn depth_at(&self, x: f32, y: f32) -> f32 {
        -(self.d + self.a * x + self.b * y) / self.c
    }
}

/// Screen-space containment test for one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleTest {
    vertices: [Vec2; 3],
    min: Vec2,
    max: Vec2,
}

impl TriangleTest {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            vertices: [a, b, c],
            min: Vec2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            max: Vec2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        }
    }

    /// Drops `z` from each corner.
    pub fn from_projected(points: [Vec3; 3]) -> Self {
        let [a, b, c] = points.map(|p| Vec2::new(p.x, p.y));
        Self::new(a, b, c)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        if p.x < self.min.x || p.x > self.max.x || p.y < self.min.y || p.y > self.max.y {
            return false;
        }

        let [a, b, c] = self.vertices;
        let edges = [side_of_ray(a, b, p), side_of_ray(b, c, p), side_of_ray(c, a, p)];

        edges.iter().all(|&e| e >= 0.0) || edges.iter().all(|&e| e < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_depth() {
        // z = 2x + 3y + 1
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 3.0),
            Vec3::new(0.0, 1.0, 4.0),
        )
        .unwrap();
        assert_relative_eq!(plane.depth_at(0.0, 0.0), 1.0);
        assert_relative_eq!(plane.depth_at(2.0, 5.0), 20.0);
    }

    #[test]
    fn test_plane_rejects_degenerate_faces() {
        let collinear = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(collinear, Err(VisibilityError::DegenerateFace));

        let edge_on = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        );
        assert_eq!(edge_on, Err(VisibilityError::DegenerateFace));
    }

    #[test]
    fn test_triangle_contains_both_windings() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        for test in [TriangleTest::new(a, b, c), TriangleTest::new(a, c, b)] {
            assert!(test.contains(Vec2::new(2.0, 2.0)));
            assert!(!test.contains(Vec2::new(8.0, 8.0)));
            assert!(!test.contains(Vec2::new(-1.0, 3.0)));
        }
    }
}
