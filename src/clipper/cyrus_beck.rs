//! Cyrus-Beck clipping against a convex polygon.
//!
//! The polygon is first wound counter-clockwise so that its interior lies to
//! the left of every edge. For each edge an inward unit normal `n` is built and
//! compared with the segment direction `v`:
//!
//! - `v · n == 0`: the segment is parallel to the edge; if its start lies to
//!   the right of the edge it is outside the polygon entirely.
//! - `v · n < 0`: the line leaves the polygon through this edge, which bounds
//!   the exit parameter from above.
//! - `v · n > 0`: the line enters through this edge, which bounds the entry
//!   parameter from below.
//!
//! The crossing parameter comes from a line-line intersection in parametric
//! form, so vertical and horizontal edges need no special slope handling.
//! Everything is evaluated in `f64`.

use super::{ClipError, LineClipper};
use crate::colors::Color;
use crate::geometry::{self, Polygon, Segment};
use crate::render::{draw_polygon_outline, RasterError, RasterSurface};

/// Below this magnitude `v · n` is treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default)]
pub struct CyrusBeck;

impl CyrusBeck {
    /// The visible parameter interval `(t_entry, t_exit)`, if any.
    pub fn interval(segment: Segment, polygon: &Polygon) -> Result<Option<(f64, f64)>, ClipError> {
        if polygon.is_empty() {
            return Ok(None);
        }
        if polygon.len() < 3 {
            return Err(ClipError::DegeneratePolygon(polygon.len()));
        }
        let direction = segment
            .direction()
            .normalize()
            .ok_or(ClipError::DegenerateSegment)?;

        let polygon = polygon.to_counter_clockwise();
        let center = polygon
            .centroid()
            .ok_or(ClipError::DegeneratePolygon(polygon.len()))?;

        let origin = segment.start.to_dvec2();
        let delta = segment.direction();

        let mut t_entry = 0.0f64;
        let mut t_exit = 1.0f64;

        for edge in polygon.edges() {
            let a = edge.start.to_dvec2();
            let b = edge.end.to_dvec2();
            let normal = geometry::inward_normal(a, b, center)
                .ok_or(ClipError::DegeneratePolygon(polygon.len()))?;
            let v_dot = direction.dot(normal);

            let crossing = if v_dot.abs() < PARALLEL_EPSILON {
                None
            } else {
                geometry::intersection_parameter(origin, delta, a, b - a)
            };

            match crossing {
                None => {
                    if geometry::is_right_of(a, b, origin) {
                        return Ok(None);
                    }
                }
                Some(t) if v_dot < 0.0 => t_exit = t_exit.min(t),
                Some(t) => t_entry = t_entry.max(t),
            }
        }

        Ok((t_entry < t_exit).then_some((t_entry, t_exit)))
    }
}

impl LineClipper for CyrusBeck {
    type Region = Polygon;

    fn clip(&self, segment: Segment, polygon: &Polygon) -> Result<Option<Segment>, ClipError> {
        Ok(Self::interval(segment, polygon)?.map(|(t_entry, t_exit)| {
            Segment::new(segment.at_rounded(t_entry), segment.at_rounded(t_exit))
        }))
    }

    fn draw_region(
        &self,
        surface: &mut dyn RasterSurface,
        polygon: &Polygon,
        color: Color,
    ) -> Result<usize, RasterError> {
        draw_polygon_outline(surface, &polygon.to_counter_clockwise(), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::from(vec![(0, 0), (10, 0), (5, 10)])
    }

    #[test]
    fn test_fully_outside_is_rejected() {
        assert_eq!(CyrusBeck.clip(Segment::from_coords(20, 20, 30, 30), &triangle()), Ok(None));
        assert_eq!(CyrusBeck.clip(Segment::from_coords(-8, 2, -1, 9), &triangle()), Ok(None));
    }

    #[test]
    fn test_crossing_the_square() {
        let square = Polygon::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
        let clipped = CyrusBeck.clip(Segment::from_coords(-5, 5, 15, 5), &square);
        assert_eq!(clipped, Ok(Some(Segment::from_coords(0, 5, 10, 5))));
    }

    #[test]
    fn test_winding_does_not_matter() {
        let segment = Segment::from_coords(-5, 4, 15, 4);
        let ccw = CyrusBeck.clip(segment, &triangle()).unwrap();
        let cw = CyrusBeck
            .clip(segment, &Polygon::from(vec![(0, 0), (5, 10), (10, 0)]))
            .unwrap();
        assert_eq!(ccw, cw);
        // the triangle spans x in [2, 8] at y = 4
        assert_eq!(ccw, Some(Segment::from_coords(2, 4, 8, 4)));
    }

    #[test]
    fn test_parallel_outside_edge() {
        // Runs along y = -2, parallel to the bottom edge and below it.
        assert_eq!(CyrusBeck.clip(Segment::from_coords(1, -2, 9, -2), &triangle()), Ok(None));
    }

    #[test]
    fn test_one_endpoint_inside() {
        let square = Polygon::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
        let clipped = CyrusBeck.clip(Segment::from_coords(5, 5, 5, 30), &square);
        assert_eq!(clipped, Ok(Some(Segment::from_coords(5, 5, 5, 10))));
    }

    #[test]
    fn test_far_endpoints_stay_on_the_segment() {
        let square = Polygon::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
        assert_eq!(
            CyrusBeck.clip(Segment::from_coords(-17_000_000, 5, 3, 5), &square),
            Ok(Some(Segment::from_coords(0, 5, 3, 5)))
        );
        assert_eq!(
            CyrusBeck.clip(Segment::from_coords(-100_000_000, 5, 5, 5), &square),
            Ok(Some(Segment::from_coords(0, 5, 5, 5)))
        );
        let wide = Segment::from_coords(i32::MIN / 2 - 10, 5, i32::MAX / 2 + 10, 5);
        assert_eq!(CyrusBeck.clip(wide, &square), Ok(Some(Segment::from_coords(0, 5, 10, 5))));
    }

    #[test]
    fn test_degenerate_inputs() {
        let segment = Segment::from_coords(1, 1, 4, 4);
        assert_eq!(CyrusBeck.clip(segment, &Polygon::default()), Ok(None));
        assert_eq!(
            CyrusBeck.clip(segment, &Polygon::from(vec![(0, 0), (3, 3)])),
            Err(ClipError::DegeneratePolygon(2))
        );
        assert_eq!(
            CyrusBeck.clip(Segment::from_coords(2, 2, 2, 2), &triangle()),
            Err(ClipError::DegenerateSegment)
        );
        assert_eq!(
            CyrusBeck.clip(segment, &Polygon::from(vec![(0, 0), (0, 0), (5, 5)])),
            Err(ClipError::DegeneratePolygon(3))
        );
    }
}
