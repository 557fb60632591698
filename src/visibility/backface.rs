//! Object-space back-face culling.
//!
//! A face is treated as front-facing when the vector from the mesh centroid to
//! its first vertex points along [`Vec3::VIEW`]. The test needs no depth
//! buffer and is exact only for convex meshes around their centroid, which is
//! what the wireframe view is for.

use super::RenderStats;
use crate::colors::Color;
use crate::geometry::{Point2, Segment};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{Face, Mesh};
use crate::render::{draw_line, RasterSurface};

/// Culling context for one mesh.
pub struct BackfaceResolver<'a> {
    mesh: &'a Mesh,
    centroid: Vec3,
}

impl<'a> BackfaceResolver<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            centroid: mesh.centroid().unwrap_or(Vec3::ZERO),
        }
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn is_visible(&self, face: &Face) -> bool {
        let [v0, _, _] = self.mesh.face_vertices(face);
        (v0 - self.centroid).dot(Vec3::VIEW) > 0.0
    }

    /// Indices of the faces that survive culling.
    pub fn visible_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.mesh
            .faces()
            .iter()
            .enumerate()
            .filter(|(_, face)| self.is_visible(face))
            .map(|(i, _)| i)
    }

    /// Draws the edges of every visible face.
    ///
    /// A face is drawn whole or not at all: if any corner falls off the
    /// surface the face is counted as skipped and none of its edges are drawn.
    pub fn draw<S: RasterSurface + ?Sized>(&self, surface: &mut S, color: Color) -> RenderStats {
        let mut stats = RenderStats::default();

        for face in self.mesh.faces() {
            if !self.is_visible(face) {
                stats.faces_culled += 1;
                continue;
            }

            let [a, b, c] = self
                .mesh
                .face_vertices(face)
                .map(|v| Point2::round_from(Vec2::new(v.x, v.y)));

            if ![a, b, c].iter().all(|p| surface.contains(p.x, p.y)) {
                stats.faces_skipped += 1;
                continue;
            }

            let mut drawn = 0;
            for edge in [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)] {
                // Both endpoints are on the surface, so the edge fits.
                if let Ok(pixels) = draw_line(&mut *surface, edge, color) {
                    drawn += pixels;
                }
            }
            stats.pixels_written += drawn;
            stats.faces_drawn += 1;
        }

        stats
    }
}
