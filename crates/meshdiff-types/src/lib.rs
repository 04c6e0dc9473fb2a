//! Core mesh types for meshdiff.
//!
//! This crate provides the foundational types shared by the mesh comparison
//! pipeline:
//!
//! - [`Vertex`] - A point in 3D space with optional normal and color
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices and optional
//!   per-corner (wedge) UV coordinates
//! - [`Triangle`] - A concrete triangle with resolved vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! The library is unit-agnostic. All coordinates are `f64`; distances
//! produced downstream are in whatever units the input meshes use.
//!
//! # Coordinate System
//!
//! Right-handed coordinates. Face winding is **counter-clockwise when viewed
//! from outside**, so face normals point outward by the right-hand rule.
//!
//! # Wedge UVs
//!
//! Texture coordinates are stored per triangle corner ("wedge" UVs), not per
//! shared vertex, so texture seams may be discontinuous. See
//! [`IndexedMesh::set_wedge_uvs`].
//!
//! # Example
//!
//! ```
//! use meshdiff_types::{IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!((mesh.surface_area() - 0.5).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, unit_square};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
