//! Mesh difference heatmaps.
//!
//! This umbrella crate re-exports the meshdiff-* crates and provides the
//! one-call comparison pipeline. Given a UV-mapped source mesh and a target
//! mesh, [`compare_meshes`] produces a signed distance per surface sample,
//! heatmap colors, a UV-space texture with coverage mask, and per-vertex
//! colors merged back into the source mesh.
//!
//! # Quick Start
//!
//! ```
//! use meshdiff::prelude::*;
//!
//! // Two flat unit squares, the target lifted along the source's normals.
//! let mut source = unit_square();
//! let mut target = unit_square();
//! target.translate(Vector3::new(0.0, 0.0, 0.1));
//!
//! let params = CompareParams::new()
//!     .with_sample_count(500)
//!     .with_texture_dim(64)
//!     .with_seed(7);
//! let result = compare_meshes(&mut source, &target, &params).unwrap();
//!
//! // The target sits 0.1 in front of every source point.
//! assert!(result.distances.values().iter().all(|&d| d > 0.0));
//! assert_eq!(result.texture.dimension(), 64);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`sample`] - barycentric mapping and area-weighted surface sampling
//! - [`chamfer`] - signed nearest-neighbor distances, bidirectional
//!   aggregation, distance statistics
//! - [`heatmap`] - breakpoint colorization, texture and vertex-color baking
//! - [`pipeline`] - parameters, result, and the [`compare_meshes`] driver
//!
//! # Out of Scope
//!
//! Mesh file I/O, UV unwrapping, decimation, and ICP registration belong to
//! external collaborators. The pipeline assumes loaded, triangulated,
//! already-aligned meshes; `SampledCloud::translation_to` is the hook for an
//! external registration step.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
pub mod pipeline;

pub use meshdiff_chamfer as chamfer;
pub use meshdiff_heatmap as heatmap;
pub use meshdiff_sample as sample;
pub use meshdiff_types as types;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{CompareParams, ComparisonResult, compare_meshes};

/// The most common imports in one place.
pub mod prelude {
    pub use crate::chamfer::{DistanceField, DistanceStats, chamfer_distances};
    pub use crate::heatmap::{
        BakedTexture, LinearRgba, bake_texture, bake_vertex_colors, colorize, colorize_cloud,
    };
    pub use crate::pipeline::{CompareParams, ComparisonResult, compare_meshes};
    pub use crate::sample::{SampledCloud, sample_surface};
    pub use crate::types::{
        Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vector3, Vertex,
        VertexColor, unit_square,
    };
    pub use crate::{PipelineError, PipelineResult};
}
