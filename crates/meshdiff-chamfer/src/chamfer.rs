//! Bidirectional chamfer aggregation.

use meshdiff_sample::SampledCloud;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{ChamferError, ChamferResult};
use crate::field::DistanceField;
use crate::signed::{SignedDistance, SignedDistanceIndex};

/// Neighbors consulted per target point in the backward pass.
pub const BACKWARD_NEIGHBORS: usize = 5;

/// Compute one signed distance per source point from both directions.
///
/// Forward pass: every source point queries its single nearest neighbor in
/// the target and the result lands at the source point's own index, so each
/// entry is initialized exactly once. Backward pass: every target point
/// queries its [`BACKWARD_NEIGHBORS`] nearest source points, and each hit
/// blends into the current value at that source index:
/// `out[idx] = (out[idx] - sd) / 2`.
///
/// The backward blend is order-dependent when several target points touch
/// the same source index. To keep runs reproducible, neighbor lookups fan
/// out in parallel but the folds are applied sequentially in target-point
/// order, nearest neighbor first. The result is a similarity-aware variant
/// of chamfer distance, not a symmetric metric.
///
/// # Errors
///
/// Returns [`ChamferError::EmptySourceCloud`] / `EmptyTargetCloud` if either
/// cloud has no points.
///
/// # Example
///
/// ```
/// use meshdiff_chamfer::chamfer_distances;
/// use meshdiff_sample::SampledCloud;
/// use nalgebra::{Point3, Vector3};
///
/// let cloud = SampledCloud::from_parts(
///     vec![Point3::origin()],
///     vec![Vector3::z()],
///     vec![0],
/// )
/// .unwrap();
///
/// // A cloud compared against itself is at distance zero.
/// let field = chamfer_distances(&cloud, &cloud).unwrap();
/// assert_eq!(field.values(), &[0.0]);
/// ```
pub fn chamfer_distances(
    source: &SampledCloud,
    target: &SampledCloud,
) -> ChamferResult<DistanceField> {
    if source.is_empty() {
        return Err(ChamferError::EmptySourceCloud);
    }
    if target.is_empty() {
        return Err(ChamferError::EmptyTargetCloud);
    }

    info!(
        source_points = source.len(),
        target_points = target.len(),
        "computing bidirectional chamfer distances"
    );

    let source_index = SignedDistanceIndex::new(source)?;
    let target_index = SignedDistanceIndex::new(target)?;

    // Forward: source -> target, one entry per source point.
    let mut distances: Vec<f64> = source
        .points()
        .par_iter()
        .zip(source.normals().par_iter())
        .map(|(point, normal)| target_index.signed_distance(point, normal).value)
        .collect();

    // Backward: target -> source. Lookups are parallel; the order-dependent
    // per-index folds run sequentially in target order.
    let backward: Vec<Vec<SignedDistance>> = target
        .points()
        .par_iter()
        .zip(target.normals().par_iter())
        .map(|(point, normal)| source_index.signed_distances(point, normal, BACKWARD_NEIGHBORS))
        .collect();

    for hits in &backward {
        for hit in hits {
            distances[hit.nearest] = (distances[hit.nearest] - hit.value) / 2.0;
        }
    }

    debug!(entries = distances.len(), "chamfer distance field complete");

    Ok(DistanceField::from_values(distances))
}
