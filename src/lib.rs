//! A small CPU raster core.
//!
//! Integer line and circle rasterization, line clipping against rectangles
//! and convex polygons, homogeneous affine transforms and two hidden-surface
//! strategies for triangle meshes (back-face culling and a Z-buffer). SDL2 is
//! used only by the demo viewer to put a finished [`Surface`] on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastkit::prelude::*;
//!
//! let mut engine = Engine::new(800, 600);
//! engine.load_cube_mesh();
//! engine.transform_mut().set_scale_uniform(150.0).set_rotation_y(30.0);
//! engine.set_frame_offset(400.0, 300.0);
//! let stats = engine.render_frame();
//! engine.save_frame("cube.png")?;
//! ```

pub mod clipper;
pub mod colors;
pub mod engine;
pub mod fill;
pub mod filter;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod render;
pub mod transform;
pub mod visibility;
pub mod window;

pub use engine::{Engine, EngineConfig, EngineError, VisibilityMode};
pub use mesh::{Mesh, MeshError};
pub use render::{RasterSurface, Surface};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastkit::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, EngineConfig, EngineError, VisibilityMode};

    // Geometry
    pub use crate::geometry::{Point2, Polygon, Rect, Segment};

    // Math
    pub use crate::math::dvec2::DVec2;
    pub use crate::math::mat3::Mat3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Mesh & Transform
    pub use crate::mesh::{Face, IndexBase, Mesh};
    pub use crate::transform::Transform;

    // Rendering
    pub use crate::colors::{self, Color};
    pub use crate::render::{draw_circle, draw_line, RasterSurface, Surface};

    // Clipping
    pub use crate::clipper::{ClipAlgorithm, CyrusBeck, LineClipper, RectClipper};

    // Visibility
    pub use crate::visibility::{BackfaceResolver, RenderStats, Shading, ZBufferResolver};
}
