//! Line clipping against 2D regions.
//!
//! Three algorithms are available behind the [`LineClipper`] trait:
//!
//! - [`CohenSutherland`]: outcode-driven endpoint walking against a rectangle
//! - [`LiangBarsky`]: parametric interval clipping against a rectangle
//! - [`CyrusBeck`]: parametric clipping against any convex polygon
//!
//! [`LineClipper::clip`] is pure and returns the visible sub-segment.
//! [`LineClipper::clip_and_draw`] additionally paints the region outline and
//! the visible part, which is how the clippers are visualized.

mod cohen_sutherland;
mod cyrus_beck;
mod liang_barsky;

pub use cohen_sutherland::{outcode, CohenSutherland, BOTTOM, INSIDE, LEFT, RIGHT, TOP};
pub use cyrus_beck::CyrusBeck;
pub use liang_barsky::LiangBarsky;

use thiserror::Error;

use crate::colors::{self, Color};
use crate::geometry::{Rect, Segment};
use crate::render::{draw_line, RasterError, RasterSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipError {
    #[error("segment has zero length")]
    DegenerateSegment,
    #[error("clip polygon needs at least 3 distinct vertices, got {0}")]
    DegeneratePolygon(usize),
    #[error("clipping did not settle within {0} iterations")]
    NoConvergence(usize),
}

/// Colors used when a clip is visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipStyle {
    pub outline: Color,
    pub segment: Color,
}

impl Default for ClipStyle {
    fn default() -> Self {
        Self {
            outline: colors::OUTLINE,
            segment: colors::SEGMENT,
        }
    }
}

/// What a visualized clip produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipOutcome {
    /// Visible part of the input, if any.
    pub visible: Option<Segment>,
    /// False when the region outline did not fit the surface.
    pub outline_drawn: bool,
    /// True when a visible part existed and fit the surface.
    pub segment_drawn: bool,
}

/// A line clipping algorithm for a particular kind of region.
pub trait LineClipper {
    type Region: ?Sized;

    /// Computes the part of `segment` inside `region`.
    ///
    /// `Ok(None)` means the segment is invisible.
    fn clip(&self, segment: Segment, region: &Self::Region) -> Result<Option<Segment>, ClipError>;

    /// Draws the outline of `region`.
    fn draw_region(
        &self,
        surface: &mut dyn RasterSurface,
        region: &Self::Region,
        color: Color,
    ) -> Result<usize, RasterError>;

    /// Clips `segment`, then draws the region outline and the visible part.
    ///
    /// Drawing follows the rasterizer's all-or-nothing bounds policy; shapes
    /// that do not fit are reported through the outcome flags.
    fn clip_and_draw(
        &self,
        surface: &mut dyn RasterSurface,
        segment: Segment,
        region: &Self::Region,
        style: ClipStyle,
    ) -> Result<ClipOutcome, ClipError> {
        let visible = self.clip(segment, region)?;
        let outline_drawn = self.draw_region(&mut *surface, region, style.outline).is_ok();
        let segment_drawn = match visible {
            Some(part) => draw_line(&mut *surface, part, style.segment).is_ok(),
            None => false,
        };
        Ok(ClipOutcome {
            visible,
            outline_drawn,
            segment_drawn,
        })
    }
}

/// Available rectangle clipping algorithms.
///
/// Use this enum to pick an algorithm at runtime through [`RectClipper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipAlgorithm {
    /// Outcode-based endpoint walking.
    #[default]
    CohenSutherland,
    /// Parametric entry/exit interval.
    LiangBarsky,
}

impl std::fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipAlgorithm::CohenSutherland => write!(f, "Cohen-Sutherland"),
            ClipAlgorithm::LiangBarsky => write!(f, "Liang-Barsky"),
        }
    }
}

/// Dispatcher that holds both rectangle clippers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectClipper {
    cohen_sutherland: CohenSutherland,
    liang_barsky: LiangBarsky,
    active: ClipAlgorithm,
}

impl RectClipper {
    pub fn new(algorithm: ClipAlgorithm) -> Self {
        Self {
            active: algorithm,
            ..Self::default()
        }
    }

    pub fn set_algorithm(&mut self, algorithm: ClipAlgorithm) {
        self.active = algorithm;
    }

    pub fn algorithm(&self) -> ClipAlgorithm {
        self.active
    }
}

impl LineClipper for RectClipper {
    type Region = Rect;

    #[inline]
    fn clip(&self, segment: Segment, region: &Rect) -> Result<Option<Segment>, ClipError> {
        match self.active {
            ClipAlgorithm::CohenSutherland => self.cohen_sutherland.clip(segment, region),
            ClipAlgorithm::LiangBarsky => self.liang_barsky.clip(segment, region),
        }
    }

    fn draw_region(
        &self,
        surface: &mut dyn RasterSurface,
        region: &Rect,
        color: Color,
    ) -> Result<usize, RasterError> {
        crate::render::draw_rect_outline(surface, region, color)
    }
}
