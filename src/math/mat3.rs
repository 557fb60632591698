//! 3x3 homogeneous matrix for planar affine transforms.
//!
//! Same conventions as [`Mat4`](super::mat4::Mat4): column vectors
//! `[x, y, 1]ᵗ`, translation in the last column, angles in degrees.

use std::ops::Mul;

use super::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Mat3::new([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    pub fn scaling(x: f32, y: f32) -> Self {
        Mat3::new([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];
        for (row, out_row) in result.iter_mut().enumerate() {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = (0..3).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }
        Mat3::new(result)
    }
}

/// Transform a point: Mat3 * [x, y, 1]ᵗ.
impl Mul<Vec2> for Mat3 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Self::Output {
        let m = &self.data;
        Vec2::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Mat3::rotation(90.0) * Vec2::new(1.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scale_then_translate() {
        let m = Mat3::translation(3.0, -1.0) * Mat3::scaling(2.0, 4.0);
        assert_eq!(m * Vec2::new(1.0, 1.0), Vec2::new(5.0, 3.0));
        assert_eq!(Mat3::identity() * m, m);
    }
}
