//! Bresenham line rasterization.
//!
//! The line is stepped one pixel at a time along its major axis (the axis with
//! the larger extent). An integer error accumulator tracks how far the ideal
//! line has drifted along the minor axis; once twice the accumulated error
//! exceeds the major-axis delta, the minor coordinate advances by one and the
//! error is paid back. Only additions and comparisons are needed per pixel.
//!
//! Endpoints are first ordered so that `x` never decreases, which leaves four
//! cases depending on the sign of `dy` and on which axis is major.

use super::surface::RasterSurface;
use super::RasterError;
use crate::colors::Color;
use crate::geometry::Segment;

/// Draws `segment` and returns the number of pixels written.
///
/// The whole segment must lie inside the surface; otherwise nothing is drawn
/// and [`RasterError::OutOfBounds`] is returned.
pub fn draw_line<S>(surface: &mut S, segment: Segment, color: Color) -> Result<usize, RasterError>
where
    S: RasterSurface + ?Sized,
{
    let (start, end) = if segment.start.x > segment.end.x {
        (segment.end, segment.start)
    } else {
        (segment.start, segment.end)
    };

    if !surface.contains(start.x, start.y) || !surface.contains(end.x, end.y) {
        return Err(RasterError::OutOfBounds);
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let mut x = start.x;
    let mut y = start.y;
    let mut err = 0;
    let mut written = 1;
    surface.set_pixel(x, y, color);

    if dy >= 0 {
        if dx >= dy {
            // Shallow, rising: x is major.
            while x < end.x {
                err += dy;
                if 2 * err > dx {
                    y += 1;
                    err -= dx;
                }
                x += 1;
                surface.set_pixel(x, y, color);
                written += 1;
            }
        } else {
            // Steep, rising: y is major.
            while y < end.y {
                err += dx;
                if 2 * err > dy {
                    x += 1;
                    err -= dy;
                }
                y += 1;
                surface.set_pixel(x, y, color);
                written += 1;
            }
        }
    } else if dx >= -dy {
        // Shallow, falling.
        while x < end.x {
            err -= dy;
            if 2 * err > dx {
                y -= 1;
                err -= dx;
            }
            x += 1;
            surface.set_pixel(x, y, color);
            written += 1;
        }
    } else {
        // Steep, falling.
        while y > end.y {
            err += dx;
            if 2 * err > -dy {
                x += 1;
                err += dy;
            }
            y -= 1;
            surface.set_pixel(x, y, color);
            written += 1;
        }
    }

    Ok(written)
}
