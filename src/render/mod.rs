//! Integer rasterization onto a [`RasterSurface`].
//!
//! - [`draw_line`]: Bresenham line stepping
//! - [`draw_circle`]: midpoint circle with 8-way symmetry
//! - [`draw_rect_outline`], [`draw_polygon_outline`]: outlines made of lines
//!
//! None of these keep state between calls. Geometry that does not fit the
//! surface is rejected as a whole rather than partially drawn.

mod circle;
mod line;
mod shapes;
pub mod surface;

pub use circle::draw_circle;
pub use line::draw_line;
pub use shapes::{draw_polygon_outline, draw_rect_outline};
pub use surface::{RasterSurface, Surface, SurfaceError};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RasterError {
    /// The shape's bounding box leaves the surface; nothing was drawn.
    #[error("shape does not fit inside the surface")]
    OutOfBounds,
    #[error("circle radius must not be negative, got {0}")]
    NegativeRadius(i32),
}
