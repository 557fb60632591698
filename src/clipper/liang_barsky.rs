//! Liang-Barsky rectangle clipping.
//!
//! The segment is written parametrically as `P(t) = P0 + t * (P1 - P0)`,
//! `t ∈ [0, 1]`. Each rectangle side gives one constraint `p * t <= q`:
//!
//! ```text
//! left:   p = -dx   q = x0 - x_min
//! right:  p =  dx   q = x_max - x0
//! bottom: p = -dy   q = y0 - y_min
//! top:    p =  dy   q = y_max - y0
//! ```
//!
//! `p < 0` marks a side the line enters through, so `q / p` raises the lower
//! bound; `p > 0` marks an exit and lowers the upper bound. `p == 0` means the
//! segment runs parallel to that side and is rejected outright when `q < 0`.
//! Whatever interval survives is the visible part. All of it runs in `f64`,
//! which holds every `i32` coordinate and difference exactly.

use super::{ClipError, LineClipper};
use crate::colors::Color;
use crate::geometry::{Rect, Segment};
use crate::render::{draw_rect_outline, RasterError, RasterSurface};

#[derive(Debug, Clone, Copy, Default)]
pub struct LiangBarsky;

impl LiangBarsky {
    /// The visible parameter interval `(t_enter, t_exit)`, if any.
    pub fn interval(segment: Segment, rect: &Rect) -> Option<(f64, f64)> {
        let x0 = segment.start.x as f64;
        let y0 = segment.start.y as f64;
        let dx = segment.dx() as f64;
        let dy = segment.dy() as f64;

        let constraints = [
            (-dx, x0 - rect.x_min as f64),
            (dx, rect.x_max as f64 - x0),
            (-dy, y0 - rect.y_min as f64),
            (dy, rect.y_max as f64 - y0),
        ];

        let mut t_enter = 0.0f64;
        let mut t_exit = 1.0f64;

        for (p, q) in constraints {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
        }

        (t_enter <= t_exit).then_some((t_enter, t_exit))
    }
}

impl LineClipper for LiangBarsky {
    type Region = Rect;

    fn clip(&self, segment: Segment, rect: &Rect) -> Result<Option<Segment>, ClipError> {
        Ok(Self::interval(segment, rect).map(|(t_enter, t_exit)| {
            Segment::new(segment.at_rounded(t_enter), segment.at_rounded(t_exit))
        }))
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interval_for_crossing_segment() {
        let rect = Rect::new(0, 10, 0, 10);
        let (t0, t1) = LiangBarsky::interval(Segment::from_coords(-10, 5, 20, 5), &rect).unwrap();
        assert_relative_eq!(t0, 1.0 / 3.0);
        assert_relative_eq!(t1, 2.0 / 3.0);
    }

    #[test]
    fn test_parallel_outside_is_rejected() {
        let rect = Rect::new(0, 10, 0, 10);
        assert!(LiangBarsky::interval(Segment::from_coords(-3, -2, -3, 8), &rect).is_none());
        assert!(LiangBarsky::interval(Segment::from_coords(2, 11, 8, 11), &rect).is_none());
    }

    #[test]
    fn test_point_inside_survives() {
        let rect = Rect::new(0, 10, 0, 10);
        let point = Segment::from_coords(4, 4, 4, 4);
        assert_eq!(LiangBarsky.clip(point, &rect), Ok(Some(point)));
    }

    #[test]
    fn test_endpoints_are_rounded() {
        let rect = Rect::new(0, 10, 0, 10);
        let clipped = LiangBarsky
            .clip(Segment::from_coords(-4, 0, 12, 7), &rect)
            .unwrap()
            .unwrap();
        // y at x = 0 is 1.75, at x = 10 is 6.125
        assert_eq!(clipped, Segment::from_coords(0, 2, 10, 6));
    }

    #[test]
    fn test_far_endpoints_stay_on_the_segment() {
        let rect = Rect::new(0, 10, 0, 10);
        assert_eq!(
            LiangBarsky.clip(Segment::from_coords(-17_000_000, 5, 3, 5), &rect),
            Ok(Some(Segment::from_coords(0, 5, 3, 5)))
        );
        assert_eq!(
            LiangBarsky.clip(Segment::from_coords(-100_000_000, 5, 5, 5), &rect),
            Ok(Some(Segment::from_coords(0, 5, 5, 5)))
        );

        let clipped = LiangBarsky
            .clip(Segment::from_coords(-20_000_000, 3, 20_000_007, 7), &rect)
            .unwrap()
            .unwrap();
        assert!(rect.contains(clipped.start), "{clipped:?}");
        assert!(rect.contains(clipped.end), "{clipped:?}");
    }

    #[test]
    fn test_extreme_span_does_not_overflow() {
        let rect = Rect::new(0, 10, 0, 10);
        let wide = Segment::from_coords(i32::MIN / 2 - 10, 5, i32::MAX / 2 + 10, 5);
        assert_eq!(LiangBarsky.clip(wide, &rect), Ok(Some(Segment::from_coords(0, 5, 10, 5))));

        let outside = Segment::from_coords(i32::MIN, -5, i32::MAX, -5);
        assert_eq!(LiangBarsky.clip(outside, &rect), Ok(None));
    }

    #[test]
    fn test_touching_corner_is_visible() {
        let rect = Rect::new(0, 10, 0, 10);
        let clipped = LiangBarsky
            .clip(Segment::from_coords(-5, 15, 5, 5), &rect)
            .unwrap();
        assert_eq!(clipped, Some(Segment::from_coords(0, 10, 5, 5)));
    }
}
