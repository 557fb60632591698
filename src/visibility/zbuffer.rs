//! Image-space visibility with a per-pixel depth buffer.
//!
//! Every pixel `(i, j)` of the surface is tested against every face. Among
//! the faces whose screen projection contains the pixel, the one with the
//! largest plane depth at `(i, j)` wins and its color is written. Degenerate
//! faces are dropped when the resolver is built.

use super::plane::{Plane, TriangleTest};
use super::{RenderStats, VisibilityError};
use crate::colors::{self, Color};
use crate::math::vec2::Vec2;
use crate::mesh::Mesh;
use crate::render::RasterSurface;

/// One depth per pixel, seeded with negative infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f32::NEG_INFINITY; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::NEG_INFINITY);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depths[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Stores `depth` if it is strictly greater than the current value.
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let slot = &mut self.depths[(y * self.width + x) as usize];
        if depth > *slot {
            *slot = depth;
            true
        } else {
            false
        }
    }
}

/// How a winning face's color is turned into a pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shading {
    /// The face color as is.
    #[default]
    Flat,
    /// The face color scaled by `exp(-falloff * |reference_depth - z|)`.
    DepthFalloff { reference_depth: f32, falloff: f32 },
}

impl Shading {
    pub fn shade(&self, color: Color, depth: f32) -> Color {
        match *self {
            Shading::Flat => color,
            Shading::DepthFalloff {
                reference_depth,
                falloff,
            } => colors::scale(color, (-falloff * (reference_depth - depth).abs()).exp()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PreparedFace {
    index: usize,
    plane: Plane,
    test: TriangleTest,
    color: Color,
}

/// Depth-buffer context for one mesh.
#[derive(Debug, Clone)]
pub struct ZBufferResolver {
    faces: Vec<PreparedFace>,
    skipped: usize,
    shading: Shading,
}

impl ZBufferResolver {
    /// Derives the plane and containment test of every face once.
    pub fn new(mesh: &Mesh, shading: Shading) -> Self {
        let mut faces = Vec::with_capacity(mesh.faces().len());
        let mut skipped = 0;

        for (index, face) in mesh.faces().iter().enumerate() {
            let points = mesh.face_vertices(face);
            match Plane::from_points(points[0], points[1], points[2]) {
                Ok(plane) => faces.push(PreparedFace {
                    index,
                    plane,
                    test: TriangleTest::from_projected(points),
                    color: mesh.face_color(index),
                }),
                Err(_) => skipped += 1,
            }
        }

        Self {
            faces,
            skipped,
            shading,
        }
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    pub fn set_shading(&mut self, shading: Shading) {
        self.shading = shading;
    }

    /// Faces that were dropped as degenerate.
    pub fn skipped_faces(&self) -> usize {
        self.skipped
    }

    pub fn resolve<S: RasterSurface + ?Sized>(&self, surface: &mut S) -> RenderStats {
        let mut depth = DepthBuffer::new(surface.width(), surface.height());
        self.scan(surface, &mut depth)
    }

    /// Resolves into a caller-owned depth buffer of the same size as the
    /// surface. Existing depths are respected, so several meshes can share
    /// one buffer.
    pub fn resolve_with<S: RasterSurface + ?Sized>(
        &self,
        surface: &mut S,
        depth: &mut DepthBuffer,
    ) -> Result<RenderStats, VisibilityError> {
        if (depth.width(), depth.height()) != (surface.width(), surface.height()) {
            return Err(VisibilityError::DepthSizeMismatch {
                depth_width: depth.width(),
                depth_height: depth.height(),
                surface_width: surface.width(),
                surface_height: surface.height(),
            });
        }
        Ok(self.scan(surface, depth))
    }

    fn scan<S: RasterSurface + ?Sized>(&self, surface: &mut S, depth: &mut DepthBuffer) -> RenderStats {
        let mut stats = RenderStats {
            faces_skipped: self.skipped,
            ..Default::default()
        };
        let mut owns_pixel = vec![false; self.faces.len()];

        for j in 0..surface.height() {
            for i in 0..surface.width() {
                let sample = Vec2::new(i as f32, j as f32);
                let mut winner = None;

                for (slot, face) in self.faces.iter().enumerate() {
                    if !face.test.contains(sample) {
                        continue;
                    }
                    let z = face.plane.depth_at(sample.x, sample.y);
                    if depth.test_and_set(i, j, z) {
                        winner = Some((slot, z));
                    }
                }

                if let Some((slot, z)) = winner {
                    let face = &self.faces[slot];
                    surface.set_pixel(i as i32, j as i32, self.shading.shade(face.color, z));
                    owns_pixel[slot] = true;
                    stats.pixels_written += 1;
                }
            }
        }

        stats.faces_drawn = owns_pixel.iter().filter(|&&owned| owned).count();
        stats.faces_culled = self.faces.len() - stats.faces_drawn;
        stats
    }

    /// Mesh indices of the faces that survived setup.
    pub fn face_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces.iter().map(|f| f.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use crate::mesh::IndexBase;
    use crate::render::Surface;
    use approx::assert_relative_eq;

    const RED: Color = 0xFFFF0000;
    const BLUE: Color = 0xFF0000FF;

    /// Two overlapping flat triangles at constant depths, red first then blue.
    fn overlapping(first_z: f32, second_z: f32) -> Mesh {
        let vertices = vec![
            Vec3::new(0.0, 0.0, first_z),
            Vec3::new(8.0, 0.0, first_z),
            Vec3::new(0.0, 8.0, first_z),
            Vec3::new(1.0, 1.0, second_z),
            Vec3::new(9.0, 1.0, second_z),
            Vec3::new(1.0, 9.0, second_z),
        ];
        Mesh::from_indexed(vertices, [[0, 1, 2], [3, 4, 5]], IndexBase::Zero)
            .unwrap()
            .with_face_colors(vec![RED, BLUE])
    }

    #[test]
    fn test_deeper_face_wins_regardless_of_order() {
        for (first_z, second_z, expected) in [(1.0, 5.0, BLUE), (5.0, 1.0, RED)] {
            let mesh = overlapping(first_z, second_z);
            let mut surface = Surface::new(12, 12);
            ZBufferResolver::new(&mesh, Shading::Flat).resolve(&mut surface);
            // (2, 2) lies inside both triangles
            assert_eq!(surface.get_pixel(2, 2), Some(expected));
        }
        // each face alone owns part of the surface
        let mut surface = Surface::new(12, 12);
        let stats = ZBufferResolver::new(&overlapping(1.0, 5.0), Shading::Flat).resolve(&mut surface);
        assert_eq!(surface.get_pixel(1, 1), Some(RED));
        assert_eq!(surface.get_pixel(7, 2), Some(BLUE));
        assert_eq!(stats.faces_drawn, 2);
        assert_eq!(stats.pixels_written, surface.count(RED) + surface.count(BLUE));
    }

    #[test]
    fn test_depth_buffer_is_monotone() {
        let mut depth = DepthBuffer::new(2, 2);
        assert_eq!(depth.get(0, 0), Some(f32::NEG_INFINITY));
        assert!(depth.test_and_set(0, 0, -100.0));
        assert!(depth.test_and_set(0, 0, 3.0));
        assert!(!depth.test_and_set(0, 0, 2.0));
        assert!(!depth.test_and_set(0, 0, 3.0));
        assert_eq!(depth.get(0, 0), Some(3.0));
        assert!(!depth.test_and_set(5, 0, 1.0));
        depth.clear();
        assert_eq!(depth.get(0, 0), Some(f32::NEG_INFINITY));
    }

    #[test]
    fn test_degenerate_faces_are_skipped() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 4.0, 0.0),
            Vec3::new(8.0, 8.0, 0.0),
            Vec3::new(0.0, 8.0, 0.0),
        ];
        let mesh = Mesh::from_indexed(vertices, [[0, 1, 2], [0, 2, 3]], IndexBase::Zero).unwrap();
        let resolver = ZBufferResolver::new(&mesh, Shading::Flat);
        assert_eq!(resolver.skipped_faces(), 1);
        assert_eq!(resolver.face_indices().collect::<Vec<_>>(), vec![1]);

        let mut surface = Surface::new(10, 10);
        let stats = resolver.resolve(&mut surface);
        assert_eq!(stats.faces_skipped, 1);
        assert_eq!(stats.faces_drawn, 1);
    }

    #[test]
    fn test_empty_mesh() {
        let mut surface = Surface::new(4, 4);
        let stats = ZBufferResolver::new(&Mesh::default(), Shading::Flat).resolve(&mut surface);
        assert_eq!(stats, RenderStats::default());
        assert_eq!(surface.count(colors::BLACK), 16);
    }

    #[test]
    fn test_depth_falloff() {
        let shading = Shading::DepthFalloff {
            reference_depth: 10.0,
            falloff: 0.5,
        };
        assert_eq!(shading.shade(colors::WHITE, 10.0), colors::WHITE);

        let dimmed = shading.shade(colors::WHITE, 8.0);
        let expected = (-1.0f32).exp();
        assert_relative_eq!(colors::intensity(dimmed) / 255.0, expected, epsilon = 0.01);
        // symmetric around the reference depth
        assert_eq!(dimmed, shading.shade(colors::WHITE, 12.0));
    }

    #[test]
    fn test_shared_depth_buffer() {
        let mut surface = Surface::new(12, 12);
        let mut depth = DepthBuffer::new(12, 12);
        let near = overlapping(5.0, 5.0).with_face_colors(vec![RED, RED]);
        let far = overlapping(1.0, 1.0).with_face_colors(vec![BLUE, BLUE]);

        ZBufferResolver::new(&near, Shading::Flat)
            .resolve_with(&mut surface, &mut depth)
            .unwrap();
        let stats = ZBufferResolver::new(&far, Shading::Flat)
            .resolve_with(&mut surface, &mut depth)
            .unwrap();
        assert_eq!(stats.pixels_written, 0);
        assert_eq!(stats.faces_culled, 2);
        assert_eq!(surface.count(BLUE), 0);
    }

    #[test]
    fn test_depth_buffer_size_must_match_surface() {
        let mut surface = Surface::new(12, 12);
        let mut depth = DepthBuffer::new(6, 12);
        let resolver = ZBufferResolver::new(&overlapping(1.0, 5.0), Shading::Flat);

        assert_eq!(
            resolver.resolve_with(&mut surface, &mut depth),
            Err(VisibilityError::DepthSizeMismatch {
                depth_width: 6,
                depth_height: 12,
                surface_width: 12,
                surface_height: 12,
            })
        );
        assert_eq!(surface.count(RED) + surface.count(BLUE), 0);
        assert_eq!(depth, DepthBuffer::new(6, 12));
    }
}
