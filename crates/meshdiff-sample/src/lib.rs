//! Surface sampling for mesh comparison.
//!
//! This crate turns a triangle mesh into a [`SampledCloud`]: an area-weighted
//! uniform point cloud over the mesh surface, with an interpolated unit
//! normal and the originating face index retained per sample. The cloud is
//! the unit of comparison for the signed-distance and heatmap stages.
//!
//! It also provides the barycentric machinery ([`barycentric`],
//! [`blend_vectors`], [`blend_uvs`]) used by both the sampler (normal
//! interpolation) and the texture baker (wedge-UV recovery).
//!
//! # Determinism
//!
//! For a given mesh and sample budget, the per-face sample *counts* are a
//! pure function of face areas. Sample *positions* come from the caller's
//! RNG, so a seeded generator reproduces the exact cloud:
//!
//! ```
//! use meshdiff_sample::sample_surface;
//! use meshdiff_types::unit_square;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let square = unit_square();
//! let a = sample_surface(&square, 100, &mut StdRng::seed_from_u64(7)).unwrap();
//! let b = sample_surface(&square, 100, &mut StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(a.points(), b.points());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod barycentric;
mod cloud;
mod error;
mod sampler;

pub use barycentric::{
    DEGENERATE_EPSILON, barycentric, barycentric_in_face, blend_uvs, blend_vectors,
    point_from_barycentric,
};
pub use cloud::SampledCloud;
pub use error::{SampleError, SampleResult};
pub use sampler::sample_surface;
