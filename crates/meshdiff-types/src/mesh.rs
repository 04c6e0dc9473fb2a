//! Indexed triangle mesh with optional wedge UVs.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex, VertexColor};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices by
/// index. Texture coordinates, when present, are stored per triangle corner
/// ("wedge" UVs): entry `3 * f + c` of [`wedge_uvs`](Self::wedge_uvs) is the
/// UV of corner `c` of face `f`. Wedge UVs are not shared across faces, so
/// seams may be discontinuous.
///
/// # Winding Order
///
/// Faces use counter-clockwise winding when viewed from outside; normals
/// point outward by the right-hand rule.
///
/// # Example
///
/// ```
/// use meshdiff_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(!mesh.has_wedge_uvs());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,

    /// Per-corner texture coordinates, either empty (no UVs) or exactly
    /// `3 * faces.len()` entries. Use [`Self::set_wedge_uvs`] to install.
    wedge_uvs: Vec<[f64; 2]>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            wedge_uvs: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            wedge_uvs: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            wedge_uvs: Vec::new(),
        }
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// Returns an empty mesh if either array's length is not divisible by 3.
    ///
    /// # Example
    ///
    /// ```
    /// use meshdiff_types::{IndexedMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self {
            vertices,
            faces,
            wedge_uvs: Vec::new(),
        }
    }

    /// Install per-corner texture coordinates.
    ///
    /// `uvs[3 * f + c]` must be the UV of corner `c` of face `f`. Returns
    /// `false` (leaving the mesh unchanged) if the array does not hold
    /// exactly three entries per face.
    pub fn set_wedge_uvs(&mut self, uvs: Vec<[f64; 2]>) -> bool {
        if uvs.len() == 3 * self.faces.len() && !uvs.is_empty() {
            self.wedge_uvs = uvs;
            true
        } else {
            false
        }
    }

    /// True if the mesh carries wedge UVs.
    #[inline]
    #[must_use]
    pub fn has_wedge_uvs(&self) -> bool {
        !self.wedge_uvs.is_empty() && self.wedge_uvs.len() == 3 * self.faces.len()
    }

    /// All wedge UVs as a flat per-corner slice, or `None` if absent.
    #[must_use]
    pub fn wedge_uvs(&self) -> Option<&[[f64; 2]]> {
        if self.has_wedge_uvs() {
            Some(&self.wedge_uvs)
        } else {
            None
        }
    }

    /// The three corner UVs of a face, or `None` if UVs are absent or the
    /// face index is out of bounds.
    #[must_use]
    pub fn face_wedge_uvs(&self, face_index: usize) -> Option<[[f64; 2]; 3]> {
        if !self.has_wedge_uvs() || face_index >= self.faces.len() {
            return None;
        }
        let base = 3 * face_index;
        Some([
            self.wedge_uvs[base],
            self.wedge_uvs[base + 1],
            self.wedge_uvs[base + 2],
        ])
    }

    /// True if every vertex carries a normal.
    #[must_use]
    pub fn has_vertex_normals(&self) -> bool {
        !self.vertices.is_empty()
            && self
                .vertices
                .iter()
                .all(|v| v.attributes.normal.is_some())
    }

    /// The three vertex normals of a face, or `None` if the face index is
    /// out of bounds or any corner vertex lacks a normal.
    #[must_use]
    pub fn face_vertex_normals(&self, face_index: usize) -> Option<[Vector3<f64>; 3]> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some([
            self.vertices.get(i0 as usize)?.normal()?,
            self.vertices.get(i1 as usize)?.normal()?,
            self.vertices.get(i2 as usize)?.normal()?,
        ])
    }

    /// Compute area-weighted vertex normals from adjacent faces.
    ///
    /// Each face contributes its unnormalized face normal (whose magnitude
    /// is proportional to its area) to its three corner vertices; the sums
    /// are then normalized. Vertices with no adjacent faces, or whose
    /// accumulated normal is degenerate, get a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let tri = Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            );
            let n = tri.normal_unnormalized();
            sums[i0 as usize] += n;
            sums[i1 as usize] += n;
            sums[i2 as usize] += n;
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            let norm = sum.norm();
            let normal = if norm > f64::EPSILON {
                sum / norm
            } else {
                Vector3::zeros()
            };
            vertex.attributes.normal = Some(normal);
        }
    }

    /// Set the color of a vertex, leaving other attributes untouched.
    ///
    /// Out-of-bounds indices are ignored.
    pub fn set_vertex_color(&mut self, index: usize, color: VertexColor) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            vertex.attributes.color = Some(color);
        }
    }

    /// Translate the mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Scale the mesh uniformly around the origin.
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.position.coords *= factor;
        }
    }

    /// Center the mesh at the origin and scale it uniformly so its largest
    /// bounding-box extent becomes 1.
    ///
    /// Comparing two meshes of wildly different units is meaningless;
    /// running both through this puts them in a common frame. No-op for an
    /// empty or degenerate (zero-extent) mesh.
    pub fn scale_to_unit_cube(&mut self) {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return;
        }
        let extent = bounds.largest_extent();
        if extent <= f64::EPSILON {
            return;
        }
        let center = bounds.center().coords;
        let factor = 1.0 / extent;
        for vertex in &mut self.vertices {
            vertex.position.coords = (vertex.position.coords - center) * factor;
        }
    }

    /// Total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Area of every face, in face order.
    #[must_use]
    pub fn face_areas(&self) -> Vec<f64> {
        self.triangles().map(|tri| tri.area()).collect()
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces.get(face_index).map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            )
        })
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            )
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// A unit square in the XY plane, split into two triangles.
///
/// Vertices carry +Z normals, corners carry wedge UVs matching the XY
/// positions. This is the canonical flat test fixture for the comparison
/// pipeline.
///
/// # Example
///
/// ```
/// use meshdiff_types::{MeshTopology, unit_square};
///
/// let square = unit_square();
/// assert_eq!(square.face_count(), 2);
/// assert!(square.has_wedge_uvs());
/// assert!((square.surface_area() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_square() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(4, 2);
    let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    for [x, y] in corners {
        mesh.vertices
            .push(Vertex::with_normal(Point3::new(x, y, 0.0), Vector3::z()));
    }
    mesh.faces.push([0, 1, 2]);
    mesh.faces.push([0, 2, 3]);

    let uvs = vec![
        corners[0], corners[1], corners[2], // face 0
        corners[0], corners[2], corners[3], // face 1
    ];
    let installed = mesh.set_wedge_uvs(uvs);
    debug_assert!(installed);
    mesh
}
