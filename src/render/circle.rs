//! Midpoint circle rasterization.
//!
//! Walks the octant that starts at the top of the circle `(0, R)` and runs
//! clockwise to the 45° diagonal, choosing between the east and south-east
//! pixel with an integer decision variable `f`. Every generated offset is
//! mirrored into the other seven octants.

use super::surface::RasterSurface;
use super::RasterError;
use crate::colors::Color;
use crate::geometry::Point2;

/// Draws a circle outline and returns the number of pixel writes (mirrored
/// points on the axes and diagonals are written more than once).
///
/// The bounding box `center ± radius` must lie inside the surface; otherwise
/// nothing is drawn.
pub fn draw_circle<S>(
    surface: &mut S,
    center: Point2,
    radius: i32,
    color: Color,
) -> Result<usize, RasterError>
where
    S: RasterSurface + ?Sized,
{
    if radius < 0 {
        return Err(RasterError::NegativeRadius(radius));
    }
    if !surface.contains(center.x - radius, center.y - radius)
        || !surface.contains(center.x + radius, center.y + radius)
    {
        return Err(RasterError::OutOfBounds);
    }

    let mut written = 0;
    let mut plot_octants = |dx: i32, dy: i32| {
        for (ox, oy) in [
            (dx, dy),
            (dy, dx),
            (dy, -dx),
            (dx, -dy),
            (-dx, -dy),
            (-dy, -dx),
            (-dy, dx),
            (-dx, dy),
        ] {
            surface.set_pixel(center.x + ox, center.y + oy, color);
            written += 1;
        }
    };

    let mut dx = 0;
    let mut dy = radius;
    let mut f = 1 - radius;
    plot_octants(dx, dy);

    while dx < dy {
        if f > 0 {
            dy -= 1;
            f += 2 * (dx - dy) + 5;
        } else {
            f += 2 * dx + 3;
        }
        dx += 1;
        plot_octants(dx, dy);
    }

    Ok(written)
}
