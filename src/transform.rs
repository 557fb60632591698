//! Affine transforms over points.
//!
//! The free functions apply one homogeneous operator to one point and return
//! a new point; composition order is up to the caller. [`Transform`] bundles
//! the fixed sequence the mesh pipeline uses with a fluent API for setting it
//! up.
//!
//! All angles are in degrees.

use crate::math::{mat3::Mat3, mat4::Mat4, vec2::Vec2, vec3::Vec3};

// ============ 2D ============

pub fn scale_2d(p: Vec2, factors: Vec2) -> Vec2 {
    Mat3::scaling(factors.x, factors.y) * p
}

/// Rotates counter-clockwise about the origin.
pub fn rotate_2d(p: Vec2, degrees: f32) -> Vec2 {
    Mat3::rotation(degrees) * p
}

pub fn shift_2d(p: Vec2, offset: Vec2) -> Vec2 {
    Mat3::translation(offset.x, offset.y) * p
}

// ============ 3D ============

pub fn scale_3d(p: Vec3, factors: Vec3) -> Vec3 {
    Mat4::scaling(factors.x, factors.y, factors.z) * p
}

pub fn rotate_x_3d(p: Vec3, degrees: f32) -> Vec3 {
    Mat4::rotation_x(degrees) * p
}

pub fn rotate_y_3d(p: Vec3, degrees: f32) -> Vec3 {
    Mat4::rotation_y(degrees) * p
}

pub fn rotate_z_3d(p: Vec3, degrees: f32) -> Vec3 {
    Mat4::rotation_z(degrees) * p
}

pub fn shift_3d(p: Vec3, offset: Vec3) -> Vec3 {
    Mat4::translation(offset.x, offset.y, offset.z) * p
}

/// Placement of a mesh in screen space.
///
/// Applied as: scale, then shift, then rotate about Y, then rotate about X.
///
/// ```ignore
/// let mut transform = Transform::new();
/// transform
///     .set_scale_uniform(120.0)
///     .set_shift_xyz(200.0, 150.0, 0.0)
///     .set_rotation_y(30.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scale: Vec3,
    shift: Vec3,
    rotation_y: f32,
    rotation_x: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            shift: Vec3::ZERO,
            rotation_y: 0.0,
            rotation_x: 0.0,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (scale=1, shift=0, no rotation).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Shift ============

    pub fn shift(&self) -> Vec3 {
        self.shift
    }

    pub fn set_shift(&mut self, shift: Vec3) -> &mut Self {
        self.shift = shift;
        self
    }

    pub fn set_shift_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.shift = Vec3::new(x, y, z);
        self
    }

    // ============ Rotation ============

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn set_rotation_y(&mut self, degrees: f32) -> &mut Self {
        self.rotation_y = degrees;
        self
    }

    pub fn set_rotation_x(&mut self, degrees: f32) -> &mut Self {
        self.rotation_x = degrees;
        self
    }

    /// Add to the Y rotation.
    pub fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        self.rotation_y += degrees;
        self
    }

    /// Add to the X rotation.
    pub fn rotate_x(&mut self, degrees: f32) -> &mut Self {
        self.rotation_x += degrees;
        self
    }

    // ============ Application ============

    /// Order: RotationX * RotationY * Shift * Scale
    /// (scale applied first, rotation about X last)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.rotation_x)
            * Mat4::rotation_y(self.rotation_y)
            * Mat4::translation(self.shift.x, self.shift.y, self.shift.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.to_matrix() * p
    }

    /// Transforms every point, leaving the input untouched.
    pub fn apply_all(&self, points: &[Vec3]) -> Vec<Vec3> {
        let matrix = self.to_matrix();
        points.iter().map(|&p| matrix * p).collect()
    }
}
