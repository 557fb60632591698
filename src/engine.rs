//! Pipeline driver.
//!
//! The [`Engine`] owns a frame and a mesh and runs the fixed pipeline
//! `mesh -> transform -> visibility resolver -> surface`. The 2D clipping path
//! is independent of the mesh and draws straight into the same frame.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::clipper::{
    ClipAlgorithm, ClipError, ClipOutcome, ClipStyle, CyrusBeck, LineClipper, RectClipper,
};
use crate::colors::{self, Color};
use crate::geometry::{Polygon, Rect, Segment};
use crate::math::{mat4::Mat4, vec2::Vec2};
use crate::mesh::{Mesh, MeshError};
use crate::render::{RasterError, RasterSurface, Surface, SurfaceError};
use crate::transform::Transform;
use crate::visibility::{BackfaceResolver, RenderStats, Shading, ZBufferResolver};

const DEFAULT_FALLOFF: f32 = 0.01;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Hidden-surface strategy used by [`Engine::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityMode {
    /// Wireframe of the faces that pass back-face culling.
    BackfaceCulling,
    /// Flat-colored faces resolved per pixel.
    #[default]
    ZBuffer,
    /// Like [`VisibilityMode::ZBuffer`], dimmed with distance from a
    /// reference depth.
    ZBufferLit,
}

impl VisibilityMode {
    pub fn next(self) -> Self {
        match self {
            VisibilityMode::BackfaceCulling => VisibilityMode::ZBuffer,
            VisibilityMode::ZBuffer => VisibilityMode::ZBufferLit,
            VisibilityMode::ZBufferLit => VisibilityMode::BackfaceCulling,
        }
    }
}

impl fmt::Display for VisibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityMode::BackfaceCulling => write!(f, "BackfaceCulling"),
            VisibilityMode::ZBuffer => write!(f, "ZBuffer"),
            VisibilityMode::ZBufferLit => write!(f, "ZBufferLit"),
        }
    }
}

/// Everything that shapes a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub transform: Transform,
    /// Added to `x`/`y` after `transform`.
    pub frame_offset: Vec2,
    pub visibility: VisibilityMode,
    pub clip_algorithm: ClipAlgorithm,
    pub clip_style: ClipStyle,
    pub background: Color,
    pub wireframe: Color,
    /// Attenuation rate for [`VisibilityMode::ZBufferLit`].
    pub falloff: f32,
    /// Depth rendered at full brightness. `None` uses the largest vertex depth
    /// of the transformed mesh.
    pub reference_depth: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            frame_offset: Vec2::ZERO,
            visibility: VisibilityMode::default(),
            clip_algorithm: ClipAlgorithm::default(),
            clip_style: ClipStyle::default(),
            background: colors::BACKGROUND,
            wireframe: colors::WIREFRAME,
            falloff: DEFAULT_FALLOFF,
            reference_depth: None,
        }
    }
}

impl EngineConfig {
    /// Shading for the configured mode, given the already transformed mesh.
    pub fn shading_for(&self, mesh: &Mesh) -> Shading {
        match self.visibility {
            VisibilityMode::ZBufferLit => {
                let nearest = mesh
                    .vertices()
                    .iter()
                    .map(|v| v.z)
                    .fold(f32::NEG_INFINITY, f32::max);
                Shading::DepthFalloff {
                    reference_depth: self
                        .reference_depth
                        .unwrap_or(if nearest.is_finite() { nearest } else { 0.0 }),
                    falloff: self.falloff,
                }
            }
            _ => Shading::Flat,
        }
    }
}

pub struct Engine {
    config: EngineConfig,
    clipper: RectClipper,
    mesh: Mesh,
    frame: Surface,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, EngineConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: EngineConfig) -> Self {
        Self {
            clipper: RectClipper::new(config.clip_algorithm),
            config,
            mesh: Mesh::default(),
            frame: Surface::filled(width, height, config.background),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.config.transform
    }

    /// Screen offset added after the transform, so rotations stay centered.
    pub fn set_frame_offset(&mut self, x: f32, y: f32) {
        self.config.frame_offset = Vec2::new(x, y);
    }

    pub fn set_visibility_mode(&mut self, mode: VisibilityMode) {
        self.config.visibility = mode;
    }

    pub fn visibility_mode(&self) -> VisibilityMode {
        self.config.visibility
    }

    pub fn set_clip_algorithm(&mut self, algorithm: ClipAlgorithm) {
        self.config.clip_algorithm = algorithm;
        self.clipper.set_algorithm(algorithm);
    }

    pub fn clip_algorithm(&self) -> ClipAlgorithm {
        self.clipper.algorithm()
    }

    pub fn load_cube_mesh(&mut self) {
        self.mesh = Mesh::cube();
    }

    pub fn load_mesh<P: AsRef<Path>>(&mut self, file_path: P) -> Result<(), EngineError> {
        self.mesh = Mesh::from_obj(file_path)?;
        Ok(())
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame = Surface::filled(width, height, self.config.background);
    }

    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Surface {
        &mut self.frame
    }

    pub fn clear(&mut self) {
        self.frame.clear(self.config.background);
    }

    /// Transforms `mesh` with the configured transform and resolves it into
    /// `surface`. The surface is not cleared first.
    pub fn render<S: RasterSurface + ?Sized>(&self, mesh: &Mesh, surface: &mut S) -> RenderStats {
        render_with(&self.config, mesh, surface)
    }

    /// Clears the frame and renders the engine's own mesh into it.
    pub fn render_frame(&mut self) -> RenderStats {
        self.frame.clear(self.config.background);
        render_with(&self.config, &self.mesh, &mut self.frame)
    }

    /// Clips `segment` against `rect` with the active algorithm and draws the
    /// result into the frame.
    pub fn draw_clip(&mut self, segment: Segment, rect: &Rect) -> Result<ClipOutcome, EngineError> {
        Ok(self
            .clipper
            .clip_and_draw(&mut self.frame, segment, rect, self.config.clip_style)?)
    }

    /// Same as [`Engine::draw_clip`] for a convex polygon.
    pub fn draw_clip_polygon(
        &mut self,
        segment: Segment,
        polygon: &Polygon,
    ) -> Result<ClipOutcome, EngineError> {
        Ok(CyrusBeck.clip_and_draw(&mut self.frame, segment, polygon, self.config.clip_style)?)
    }

    pub fn save_frame<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        self.frame.save(path)?;
        Ok(())
    }
}

fn render_with<S: RasterSurface + ?Sized>(
    config: &EngineConfig,
    mesh: &Mesh,
    surface: &mut S,
) -> RenderStats {
    let to_screen = Mat4::translation(config.frame_offset.x, config.frame_offset.y, 0.0)
        * config.transform.to_matrix();
    let placed = mesh.map_vertices(|v| to_screen * v);
    match config.visibility {
        VisibilityMode::BackfaceCulling => BackfaceResolver::new(&placed).draw(surface, config.wireframe),
        VisibilityMode::ZBuffer | VisibilityMode::ZBufferLit => {
            ZBufferResolver::new(&placed, config.shading_for(&placed)).resolve(surface)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_engine(mode: VisibilityMode) -> Engine {
        let mut engine = Engine::new(100, 100);
        engine.load_cube_mesh();
        engine.set_visibility_mode(mode);
        engine
            .transform_mut()
            .set_scale_uniform(25.0)
            .set_rotation_y(30.0)
            .set_rotation_x(20.0);
        engine.set_frame_offset(50.0, 50.0);
        engine
    }

    #[test]
    fn test_display() {
        assert_eq!(VisibilityMode::ZBufferLit.to_string(), "ZBufferLit");
        assert_eq!(VisibilityMode::ZBufferLit.next(), VisibilityMode::BackfaceCulling);
    }

    #[test]
    fn test_zbuffer_frame() {
        let mut engine = cube_engine(VisibilityMode::ZBuffer);
        let stats = engine.render_frame();
        assert!(stats.faces_drawn > 0);
        assert!(stats.pixels_written > 0);
        assert_eq!(stats.faces_skipped, 0);
        assert_eq!(
            engine.frame().count(colors::BACKGROUND),
            100 * 100 - stats.pixels_written
        );
    }

    #[test]
    fn test_lit_frame_is_never_brighter() {
        let mut flat = cube_engine(VisibilityMode::ZBuffer);
        let mut lit = cube_engine(VisibilityMode::ZBufferLit);
        flat.render_frame();
        lit.render_frame();
        for (f, l) in flat.frame().pixels().iter().zip(lit.frame().pixels()) {
            if *f != colors::BACKGROUND {
                assert!(colors::intensity(*l) <= colors::intensity(*f));
            }
        }
    }

    #[test]
    fn test_backface_frame() {
        let mut engine = cube_engine(VisibilityMode::BackfaceCulling);
        let stats = engine.render_frame();
        assert!(stats.faces_culled > 0);
        assert!(engine.frame().count(colors::WIREFRAME) > 0);
    }

    #[test]
    fn test_render_empty_mesh() {
        let engine = Engine::new(10, 10);
        let mut surface = Surface::new(10, 10);
        let stats = engine.render(&Mesh::default(), &mut surface);
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn test_draw_clip() {
        let mut engine = Engine::new(20, 20);
        let rect = Rect::new(0, 10, 0, 10);
        let outcome = engine
            .draw_clip(Segment::from_coords(-5, 5, 5, 5), &rect)
            .unwrap();
        assert_eq!(outcome.visible, Some(Segment::from_coords(0, 5, 5, 5)));
        assert!(outcome.outline_drawn && outcome.segment_drawn);

        engine.set_clip_algorithm(ClipAlgorithm::LiangBarsky);
        let again = engine
            .draw_clip(Segment::from_coords(-5, 5, 5, 5), &rect)
            .unwrap();
        assert_eq!(again.visible, outcome.visible);

        let err = engine.draw_clip_polygon(
            Segment::from_coords(1, 1, 1, 1),
            &Polygon::from(vec![(0, 0), (10, 0), (5, 10)]),
        );
        assert!(matches!(err, Err(EngineError::Clip(ClipError::DegenerateSegment))));
    }
}
