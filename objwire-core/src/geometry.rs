/// Geometry primitives for wireframe rendering
use nalgebra::{Matrix3xX, Vector3};

/// A polygon face, stored as 0-based vertex indices in draw order.
///
/// The loader guarantees at least three indices, all within the owning
/// mesh's vertex range. Indices are never spatially sorted; a face from a
/// malformed mesh renders exactly as listed, crossings and all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub(crate) fn new(indices: Vec<usize>) -> Self {
        debug_assert!(indices.len() >= 3);
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Immutable vertex/face geometry loaded from one file.
///
/// Vertices are the columns of a 3×N matrix so the whole set can be
/// rotated with a single matrix product.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Matrix3xX<f32>,
    faces: Vec<Face>,
}

impl Mesh {
    pub(crate) fn new(vertices: Matrix3xX<f32>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// The 3×N vertex matrix, columns are points.
    pub fn vertices(&self) -> &Matrix3xX<f32> {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.ncols()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Create an axis-aligned cube mesh, 8 vertices and 6 quad faces.
    ///
    /// Used by hosts as a fallback when no file has been loaded.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let corners = [
            Vector3::new(-half, -half, -half),
            Vector3::new(half, -half, -half),
            Vector3::new(half, half, -half),
            Vector3::new(-half, half, -half),
            Vector3::new(-half, -half, half),
            Vector3::new(half, -half, half),
            Vector3::new(half, half, half),
            Vector3::new(-half, half, half),
        ];
        let faces = vec![
            Face::new(vec![0, 1, 2, 3]), // back
            Face::new(vec![4, 5, 6, 7]), // front
            Face::new(vec![0, 1, 5, 4]), // bottom
            Face::new(vec![3, 2, 6, 7]), // top
            Face::new(vec![0, 3, 7, 4]), // left
            Face::new(vec![1, 2, 6, 5]), // right
        ];
        Self::new(Matrix3xX::from_columns(&corners), faces)
    }
}
