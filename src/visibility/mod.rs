//! Hidden-surface resolution for triangle meshes.
//!
//! Two strategies are provided, each as a context object built once per mesh:
//!
//! - [`BackfaceResolver`]: object-space culling against a fixed view vector,
//!   drawn as a wireframe
//! - [`ZBufferResolver`]: image-space per-pixel depth comparison with flat or
//!   depth-attenuated face colors
//!
//! Both read vertex `x`/`y` directly as pixel coordinates; any placement is
//! done beforehand with a [`Transform`](crate::transform::Transform).

mod backface;
mod plane;
mod zbuffer;

pub use backface::BackfaceResolver;
pub use plane::{Plane, TriangleTest};
pub use zbuffer::{DepthBuffer, Shading, ZBufferResolver};

use std::ops::AddAssign;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VisibilityError {
    /// The face is collinear or seen exactly edge-on, so it has no usable
    /// depth function.
    #[error("face has no well-defined plane")]
    DegenerateFace,

    #[error("depth buffer is {depth_width}x{depth_height}, surface is {surface_width}x{surface_height}")]
    DepthSizeMismatch {
        depth_width: u32,
        depth_height: u32,
        surface_width: u32,
        surface_height: u32,
    },
}

/// Counters returned by a resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Faces that produced at least one pixel.
    pub faces_drawn: usize,
    /// Faces rejected as back-facing or hidden behind others.
    pub faces_culled: usize,
    /// Faces that could not be processed (degenerate, or off the surface).
    pub faces_skipped: usize,
    pub pixels_written: usize,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: Self) {
        self.faces_drawn += rhs.faces_drawn;
        self.faces_culled += rhs.faces_culled;
        self.faces_skipped += rhs.faces_skipped;
        self.pixels_written += rhs.pixels_written;
    }
}
