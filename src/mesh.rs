//! Triangle meshes and their ingestion boundary.
//!
//! A [`Mesh`] owns a vertex list and a list of triangular [`Face`]s whose
//! indices are 0-based. Sources that count from 1 (OBJ, hand-written tables)
//! are translated in [`Mesh::from_indexed`]; faces with more than three
//! corners are split into a triangle fan there as well.

use std::io::BufRead;
use std::path::Path;

use thiserror::Error;

use crate::colors::{Color, FACE_PALETTE};
use crate::math::vec3::Vec3;
use crate::transform::Transform;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("face {face} has {count} indices, at least 3 are required")]
    TooFewIndices { face: usize, count: usize },
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// How the indices handed to [`Mesh::from_indexed`] are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

/// A triangle referencing three vertices of its mesh by 0-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

/// 1-based, two triangles per side.
pub const CUBE_FACES: [[usize; 3]; 12] = [
    // Front
    [1, 2, 3],
    [1, 3, 4],
    // Right
    [4, 3, 5],
    [4, 5, 6],
    // Back
    [6, 5, 7],
    [6, 7, 8],
    // Left
    [8, 7, 2],
    [8, 2, 1],
    // Top
    [2, 7, 5],
    [2, 5, 3],
    // Bottom
    [6, 8, 1],
    [6, 1, 4],
];

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_colors: Vec<Color>,
}

impl Mesh {
    /// Builds a mesh from already validated triangles.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            faces,
            face_colors: Vec::new(),
        })
    }

    /// Builds a mesh from index lists, normalizing to 0-based triangles.
    ///
    /// A face `[i0, i1, i2, i3, ...]` becomes the fan `(i0, i1, i2)`,
    /// `(i0, i2, i3)`, ...
    pub fn from_indexed<F>(vertices: Vec<Vec3>, faces: F, base: IndexBase) -> Result<Self, MeshError>
    where
        F: IntoIterator,
        F::Item: AsRef<[usize]>,
    {
        let vertex_count = vertices.len();
        let mut triangles = Vec::new();

        for (face_index, face) in faces.into_iter().enumerate() {
            let raw = face.as_ref();
            if raw.len() < 3 {
                return Err(MeshError::TooFewIndices {
                    face: face_index,
                    count: raw.len(),
                });
            }

            let indices = raw
                .iter()
                .map(|&i| {
                    let zero_based = match base {
                        IndexBase::Zero => Some(i),
                        IndexBase::One => i.checked_sub(1),
                    };
                    zero_based.filter(|&z| z < vertex_count).ok_or(MeshError::IndexOutOfRange {
                        face: face_index,
                        index: i,
                        vertex_count,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            triangles.extend(
                indices
                    .windows(2)
                    .skip(1)
                    .map(|pair| Face::new(indices[0], pair[0], pair[1])),
            );
        }

        Self::new(vertices, triangles)
    }

    /// The unit cube centered on the origin.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.iter().map(|&v| Vec3::from(v)).collect(),
            faces: CUBE_FACES
                .iter()
                .map(|f| Face::new(f[0] - 1, f[1] - 1, f[2] - 1))
                .collect(),
            face_colors: Vec::new(),
        }
    }

    /// Loads every object in an OBJ file into a single triangulated mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &Self::obj_options())?;
        Self::from_obj_models(&models)
    }

    /// Same as [`Mesh::from_obj`] for an in-memory source; material
    /// libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, MeshError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &Self::obj_options(), |_| {
                Err(tobj::LoadError::GenericFailure)
            })?;
        Self::from_obj_models(&models)
    }

    fn obj_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }

    fn from_obj_models(models: &[tobj::Model]) -> Result<Self, MeshError> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let offset = vertices.len();
            vertices.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            faces.extend(model.mesh.indices.chunks_exact(3).map(|tri| {
                Face::new(
                    offset + tri[0] as usize,
                    offset + tri[1] as usize,
                    offset + tri[2] as usize,
                )
            }));
        }

        Self::new(vertices, faces)
    }

    /// Assigns explicit face colors. Faces past the end of `colors` fall back
    /// to the default palette.
    pub fn with_face_colors(mut self, colors: Vec<Color>) -> Self {
        self.face_colors = colors;
        self
    }

    pub fn face_color(&self, face_index: usize) -> Color {
        self.face_colors
            .get(face_index)
            .copied()
            .unwrap_or(FACE_PALETTE[face_index % FACE_PALETTE.len()])
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The three corner positions of `face`.
    pub fn face_vertices(&self, face: &Face) -> [Vec3; 3] {
        face.indices().map(|i| self.vertices[i])
    }

    /// Mean of all vertices, `None` for a mesh without vertices.
    pub fn centroid(&self) -> Option<Vec3> {
        Vec3::centroid(&self.vertices)
    }

    /// A copy with every vertex run through `transform`. Faces and colors are
    /// kept unchanged.
    pub fn transformed(&self, transform: &Transform) -> Mesh {
        let matrix = transform.to_matrix();
        self.map_vertices(|v| matrix * v)
    }

    pub fn map_vertices<F: Fn(Vec3) -> Vec3>(&self, f: F) -> Mesh {
        Mesh {
            vertices: self.vertices.iter().map(|&v| f(v)).collect(),
            faces: self.faces.clone(),
            face_colors: self.face_colors.clone(),
        }
    }

    /// A copy moved so that its centroid sits at the origin.
    pub fn centered(&self) -> Mesh {
        let center = self.centroid().unwrap_or(Vec3::ZERO);
        self.map_vertices(|v| v - center)
    }

    /// Largest distance of any vertex from the centroid.
    pub fn radius(&self) -> f32 {
        let center = self.centroid().unwrap_or(Vec3::ZERO);
        self.vertices
            .iter()
            .map(|&v| (v - center).magnitude())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_vertices() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_one_based_matches_zero_based() {
        let zero = Mesh::from_indexed(quad_vertices(), [[0, 1, 2], [0, 2, 3]], IndexBase::Zero).unwrap();
        let one = Mesh::from_indexed(quad_vertices(), [[1, 2, 3], [1, 3, 4]], IndexBase::One).unwrap();
        assert_eq!(zero, one);
    }

    #[test]
    fn test_polygon_faces_are_fanned() {
        let mesh = Mesh::from_indexed(quad_vertices(), [vec![0, 1, 2, 3]], IndexBase::Zero).unwrap();
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2), Face::new(0, 2, 3)]);
    }

    #[test]
    fn test_bad_indices_are_rejected() {
        assert!(matches!(
            Mesh::from_indexed(quad_vertices(), [[0, 1, 4]], IndexBase::Zero),
            Err(MeshError::IndexOutOfRange { face: 0, index: 4, .. })
        ));
        assert!(matches!(
            Mesh::from_indexed(quad_vertices(), [[0, 1, 2]], IndexBase::One),
            Err(MeshError::IndexOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            Mesh::from_indexed(quad_vertices(), [vec![0, 1]], IndexBase::Zero),
            Err(MeshError::TooFewIndices { face: 0, count: 2 })
        ));
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        let c = cube.centroid().unwrap();
        assert_relative_eq!(c.magnitude(), 0.0);
    }

    #[test]
    fn test_obj_reader() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = Mesh::from_obj_reader(&mut source.as_bytes()).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.faces().len(), 2);
        assert!(mesh.faces().iter().all(|f| f.indices().iter().all(|&i| i < 4)));
    }

    #[test]
    fn test_face_colors_fall_back_to_palette() {
        let mesh = Mesh::cube().with_face_colors(vec![0xFF123456]);
        assert_eq!(mesh.face_color(0), 0xFF123456);
        assert_eq!(mesh.face_color(1), FACE_PALETTE[1]);
        assert_eq!(mesh.face_color(7), FACE_PALETTE[1]);
    }

    #[test]
    fn test_transformed_keeps_faces() {
        let mut t = Transform::new();
        t.set_scale_uniform(2.0);
        let cube = Mesh::cube();
        let big = cube.transformed(&t);
        assert_eq!(big.faces(), cube.faces());
        assert_eq!(big.vertices()[0], Vec3::new(-2.0, -2.0, -2.0));
    }

    #[test]
    fn test_centered() {
        let mut t = Transform::new();
        t.set_shift_xyz(5.0, -3.0, 2.0);
        let moved = Mesh::cube().transformed(&t);
        assert_relative_eq!(moved.radius(), 3.0f32.sqrt(), epsilon = 1e-5);
        let back = moved.centered();
        let c = back.centroid().unwrap();
        assert_relative_eq!(c.magnitude(), 0.0, epsilon = 1e-5);
    }
}
