//! Vector and homogeneous matrix types.

pub mod dvec2;
pub mod mat3;
pub mod mat4;
pub mod vec2;
pub mod vec3;
