//! Cohen-Sutherland rectangle clipping.
//!
//! Each endpoint gets a 4-bit outcode, one bit per violated side:
//!
//! ```text
//!  1001 | 1000 | 1010       TOP    = 8
//! ------+------+------     BOTTOM = 4
//!  0001 | 0000 | 0010       RIGHT  = 2
//! ------+------+------     LEFT   = 1
//!  0101 | 0100 | 0110
//! ```
//!
//! While either code is non-zero, an outside endpoint is slid along the line
//! onto the first side it violates (left, right, bottom, top in that order)
//! and its code recomputed. Both codes zero means the remaining segment is
//! inside; a non-zero AND of the codes means both endpoints share an outside
//! half-plane and nothing is visible.
//!
//! Intersection points are rounded to whole pixels at every step, so a moved
//! endpoint can land one pixel outside again near a corner and need another
//! pass. The loop is capped at [`MAX_ITERATIONS`].

use super::{ClipError, LineClipper};
use crate::colors::Color;
use crate::geometry::{Point2, Rect, Segment};
use crate::render::{draw_rect_outline, RasterError, RasterSurface};

pub const INSIDE: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;
pub const BOTTOM: u8 = 4;
pub const TOP: u8 = 8;

/// Upper bound on endpoint moves before giving up.
pub const MAX_ITERATIONS: usize = 16;

/// Outcode of `p` relative to `rect`. Points on the boundary are inside.
#[inline]
pub fn outcode(p: Point2, rect: &Rect) -> u8 {
    let mut code = INSIDE;
    if p.x < rect.x_min {
        code |= LEFT;
    }
    if p.x > rect.x_max {
        code |= RIGHT;
    }
    if p.y < rect.y_min {
        code |= BOTTOM;
    }
    if p.y > rect.y_max {
        code |= TOP;
    }
    code
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CohenSutherland;

impl CohenSutherland {
    /// Slides `p` along the line through `a` and `b` onto the first side
    /// flagged in `code`.
    fn move_to_boundary(
        p: Point2,
        code: u8,
        a: Point2,
        b: Point2,
        rect: &Rect,
    ) -> Result<Point2, ClipError> {
        let (a, b, p) = (a.to_dvec2(), b.to_dvec2(), p.to_dvec2());
        let d = b - a;

        let slide_x = |bound: i32| -> Result<Point2, ClipError> {
            if d.x == 0.0 {
                return Err(ClipError::DegenerateSegment);
            }
            let y = p.y + d.y * (bound as f64 - p.x) / d.x;
            Ok(Point2::new(bound, y.round() as i32))
        };
        let slide_y = |bound: i32| -> Result<Point2, ClipError> {
            if d.y == 0.0 {
                return Err(ClipError::DegenerateSegment);
            }
            let x = p.x + d.x * (bound as f64 - p.y) / d.y;
            Ok(Point2::new(x.round() as i32, bound))
        };

        if code & LEFT != 0 {
            slide_x(rect.x_min)
        } else if code & RIGHT != 0 {
            slide_x(rect.x_max)
        } else if code & BOTTOM != 0 {
            slide_y(rect.y_min)
        } else {
            slide_y(rect.y_max)
        }
    }
}

impl CohenSutherland {
    /// Clips with at most `max_moves` endpoint moves. Running out of moves
    /// before the segment is accepted or rejected is `NoConvergence`.
    pub fn clip_within(
        segment: Segment,
        rect: &Rect,
        max_moves: usize,
    ) -> Result<Option<Segment>, ClipError> {
        let mut a = segment.start;
        let mut b = segment.end;
        let mut code_a = outcode(a, rect);
        let mut code_b = outcode(b, rect);
        let mut moves = 0;

        loop {
            if code_a | code_b == INSIDE {
                return Ok(Some(Segment::new(a, b)));
            }
            if code_a & code_b != 0 {
                return Ok(None);
            }
            if moves == max_moves {
                return Err(ClipError::NoConvergence(max_moves));
            }

            if code_a != INSIDE {
                a = Self::move_to_boundary(a, code_a, a, b, rect)?;
                code_a = outcode(a, rect);
            } else {
                b = Self::move_to_boundary(b, code_b, a, b, rect)?;
                code_b = outcode(b, rect);
            }
            moves += 1;
        }
    }
}

impl LineClipper for CohenSutherland {
    type Region = Rect;

    fn clip(&self, segment: Segment, rect: &Rect) -> Result<Option<Segment>, ClipError> {
        Self::clip_within(segment, rect, MAX_ITERATIONS)
    }

    fn draw_region(
        &self,
        surface: &mut dyn RasterSurface,
        rect: &Rect,
        color: Color,
    ) -> Result<usize, RasterError> {
        draw_rect_outline(surface, rect, color)
    }
}
