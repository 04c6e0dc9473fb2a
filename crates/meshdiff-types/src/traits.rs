//! Traits for mesh types.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Minimal topology interface for a triangle mesh.
///
/// Algorithms in the sampling and baking crates only need index-based access
/// to vertices and faces; this trait is that seam.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces (triangles).
    fn face_count(&self) -> usize;

    /// True if there are no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Vertex by index, or `None` if out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Face by index as a vertex-index triple, or `None` if out of bounds.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Triangle by face index with resolved vertex positions.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all triangles with resolved vertex positions.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Interface for types with a computable bounding box.
pub trait MeshBounds {
    /// The axis-aligned bounding box (empty for an empty mesh).
    fn bounds(&self) -> Aabb;

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
