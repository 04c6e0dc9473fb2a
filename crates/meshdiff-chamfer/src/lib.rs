//! Signed surface-to-surface distances for sampled point clouds.
//!
//! Given two [`SampledCloud`](meshdiff_sample::SampledCloud)s, this crate
//! computes one signed scalar per source point describing how far the source
//! surface sits from the target surface, and on which side:
//!
//! - [`SignedDistanceIndex`] answers nearest-neighbor signed-distance
//!   queries against one cloud (k-d tree built once, then read-only).
//! - [`chamfer_distances`] runs the index in both directions and blends the
//!   two passes into a single [`DistanceField`].
//!
//! The sign comes from the query normal: positive means the nearest point on
//! the other surface lies on the side the normal points away from. When the
//! normal is nearly perpendicular to the line toward the neighbor (an
//! unreliable signal), the neighbor's own normal decides instead — a
//! robustness-over-exactness heuristic for noisy sampling.
//!
//! # Example
//!
//! ```
//! use meshdiff_chamfer::chamfer_distances;
//! use meshdiff_sample::sample_surface;
//! use meshdiff_types::unit_square;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let square = unit_square();
//! let mut rng = StdRng::seed_from_u64(0);
//! let source = sample_surface(&square, 200, &mut rng).unwrap();
//! let target = sample_surface(&square, 200, &mut rng).unwrap();
//!
//! let field = chamfer_distances(&source, &target).unwrap();
//! assert_eq!(field.len(), source.len());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod chamfer;
mod error;
mod field;
mod signed;

pub use chamfer::{BACKWARD_NEIGHBORS, chamfer_distances};
pub use error::{ChamferError, ChamferResult};
pub use field::{DistanceField, DistanceStats};
pub use signed::{PERPENDICULAR_DOT_THRESHOLD, SignedDistance, SignedDistanceIndex};
