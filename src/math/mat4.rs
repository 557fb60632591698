//! Homogeneous 4x4 matrices for affine 3D transforms.
//!
//! Points multiply on the right as columns `[x, y, z, 1]`, so `A * B * p`
//! applies `B` first. Translation sits in the last column, rotations are
//! right-handed and take degrees. The bottom row stays `[0, 0, 0, 1]`.

use std::ops::Mul;

use super::vec3::Vec3;

/// Row-major storage, `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self::affine([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], Vec3::ZERO);

    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// Builds an affine matrix from three linear rows and a translation column.
    const fn affine(r0: [f32; 3], r1: [f32; 3], r2: [f32; 3], t: Vec3) -> Self {
        Self::new([
            [r0[0], r0[1], r0[2], t.x],
            [r1[0], r1[1], r1[2], t.y],
            [r2[0], r2[1], r2[2], t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::affine([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], Vec3::new(x, y, z))
    }

    /// Per-axis scale about the origin.
    pub const fn scaling(x: f32, y: f32, z: f32) -> Self {
        Self::affine([x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z], Vec3::ZERO)
    }

    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::affine([1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c], Vec3::ZERO)
    }

    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::affine([c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c], Vec3::ZERO)
    }

    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::affine([c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0], Vec3::ZERO)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    fn column(&self, col: usize) -> [f32; 4] {
        [self.data[0][col], self.data[1][col], self.data[2][col], self.data[3][col]]
    }
}

fn dot4(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let columns = [rhs.column(0), rhs.column(1), rhs.column(2), rhs.column(3)];
        Mat4::new(self.data.map(|row| columns.map(|col| dot4(&row, &col))))
    }
}

/// Applies the matrix to a point with an implicit `w = 1`.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let p = [v.x, v.y, v.z, 1.0];
        Vec3::new(dot4(&self.data[0], &p), dot4(&self.data[1], &p), dot4(&self.data[2], &p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a, b, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_right_hand_rule() {
        // +90 about Z takes X onto Y
        assert_vec_eq(Mat4::rotation_z(90.0) * Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        // +90 about X takes Y onto Z
        assert_vec_eq(Mat4::rotation_x(90.0) * Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        // +90 about Y takes Z onto X
        assert_vec_eq(Mat4::rotation_y(90.0) * Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_chain_applies_right_first() {
        let m = Mat4::translation(10.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        assert_vec_eq(m * Vec3::new(1.0, 1.0, 1.0), Vec3::new(12.0, 2.0, 2.0));
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::rotation_y(33.0);
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity().get(3, 3), 1.0);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }
}
