//! Outlines built from line segments.

use super::line::draw_line;
use super::surface::RasterSurface;
use super::RasterError;
use crate::colors::Color;
use crate::geometry::{Polygon, Rect};

/// Draws the four sides of `rect`.
pub fn draw_rect_outline<S>(surface: &mut S, rect: &Rect, color: Color) -> Result<usize, RasterError>
where
    S: RasterSurface + ?Sized,
{
    if !surface.contains(rect.x_min, rect.y_min) || !surface.contains(rect.x_max, rect.y_max) {
        return Err(RasterError::OutOfBounds);
    }
    rect.sides()
        .into_iter()
        .try_fold(0, |acc, side| Ok(acc + draw_line(&mut *surface, side, color)?))
}

/// Draws every edge of a closed polygon, including the closing edge.
///
/// All vertices must lie inside the surface, so the outline is either drawn
/// completely or not at all.
pub fn draw_polygon_outline<S>(
    surface: &mut S,
    polygon: &Polygon,
    color: Color,
) -> Result<usize, RasterError>
where
    S: RasterSurface + ?Sized,
{
    if polygon
        .vertices
        .iter()
        .any(|p| !surface.contains(p.x, p.y))
    {
        return Err(RasterError::OutOfBounds);
    }
    polygon
        .edges()
        .try_fold(0, |acc, edge| Ok(acc + draw_line(&mut *surface, edge, color)?))
}
