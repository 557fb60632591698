use std::ops::{Add, Mul, Neg, Sub};

use super::vec2::Vec2;

/// Double-precision 2D vector for clipping math.
///
/// Pixel coordinates span the whole `i32` range, which `f32` cannot hold
/// exactly past 2^24. Parameters and intersection points are computed here
/// so a clipped endpoint never rounds past the segment it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DVec2 {
    pub x: f64,
    pub y: f64,
}

impl DVec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the planar cross product.
    pub fn cross(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Unit vector, or `None` for a zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        (magnitude > f64::EPSILON).then(|| *self * (1.0 / magnitude))
    }

    /// Rotated by +90 degrees.
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl From<Vec2> for DVec2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x as f64, v.y as f64)
    }
}

impl Add for DVec2 {
    type Output = DVec2;

    fn add(self, rhs: DVec2) -> DVec2 {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for DVec2 {
    type Output = DVec2;

    fn sub(self, rhs: DVec2) -> DVec2 {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for DVec2 {
    type Output = DVec2;

    fn mul(self, s: f64) -> DVec2 {
        Self::new(self.x * s, self.y * s)
    }
}

impl Neg for DVec2 {
    type Output = DVec2;

    fn neg(self) -> DVec2 {
        Self::new(-self.x, -self.y)
    }
}
