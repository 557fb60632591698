//! Span-based seed fill.
//!
//! Fills the 4-connected region of pixels sharing the seed pixel's color.
//! Any other color acts as a boundary. Each popped seed grows into a full
//! horizontal span, drawn as one line, and the rows above and below are
//! scanned for new seeds. Pending seeds live on an explicit stack, so region
//! size is bounded by memory rather than call depth.

use thiserror::Error;

use crate::colors::Color;
use crate::geometry::{Point2, Segment};
use crate::render::{draw_line, RasterError, RasterSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("seed point ({}, {}) is outside the surface", .0.x, .0.y)]
    SeedOutOfBounds(Point2),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Fills from `seed` and returns the number of pixels recolored.
///
/// Filling a region with its own color changes nothing and returns 0.
pub fn seed_fill<S>(surface: &mut S, seed: Point2, color: Color) -> Result<usize, FillError>
where
    S: RasterSurface + ?Sized,
{
    let target = surface
        .get_pixel(seed.x, seed.y)
        .ok_or(FillError::SeedOutOfBounds(seed))?;
    if target == color {
        return Ok(0);
    }

    let mut filled = 0;
    let mut stack = vec![seed];

    while let Some(Point2 { x, y }) = stack.pop() {
        if surface.get_pixel(x, y) != Some(target) {
            continue;
        }

        let mut left = x;
        while surface.get_pixel(left - 1, y) == Some(target) {
            left -= 1;
        }
        let mut right = x;
        while surface.get_pixel(right + 1, y) == Some(target) {
            right += 1;
        }

        filled += draw_line(&mut *surface, Segment::from_coords(left, y, right, y), color)?;

        for row in [y + 1, y - 1] {
            let mut i = left;
            while i <= right {
                if surface.get_pixel(i, row) == Some(target) {
                    stack.push(Point2::new(i, row));
                    while i <= right && surface.get_pixel(i, row) == Some(target) {
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            }
        }
    }

    Ok(filled)
}
