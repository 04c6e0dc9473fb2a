//! Nearest-neighbor signed distance queries against one cloud.

use kiddo::{KdTree, SquaredEuclidean};
use meshdiff_sample::SampledCloud;
use nalgebra::{Point3, Vector3};

use crate::error::{ChamferError, ChamferResult};

/// Below this |dot| the query normal is treated as perpendicular to the
/// line toward the neighbor (roughly a 10° cone for nearby neighbors) and
/// the neighbor's normal decides the sign instead.
pub const PERPENDICULAR_DOT_THRESHOLD: f64 = 0.15;

/// One signed-distance query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedDistance {
    /// Signed distance: Euclidean magnitude, sign per the normal rule.
    pub value: f64,
    /// Index of the neighbor in the queried cloud.
    pub nearest: usize,
}

/// A read-only signed-distance query index over a sampled cloud.
///
/// Builds a k-d tree over the cloud's points once; afterwards the index is
/// immutable and safe to share across query threads.
///
/// # Example
///
/// ```
/// use meshdiff_chamfer::SignedDistanceIndex;
/// use meshdiff_sample::SampledCloud;
/// use nalgebra::{Point3, Vector3};
///
/// let cloud = SampledCloud::from_parts(
///     vec![Point3::new(0.0, 0.0, 1.0)],
///     vec![Vector3::z()],
///     vec![0],
/// )
/// .unwrap();
/// let index = SignedDistanceIndex::new(&cloud).unwrap();
///
/// // Query point below the cloud, normal pointing up: positive distance.
/// let sd = index.signed_distance(&Point3::origin(), &Vector3::z());
/// assert!((sd.value - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct SignedDistanceIndex<'a> {
    cloud: &'a SampledCloud,
    tree: KdTree<f64, 3>,
}

impl<'a> SignedDistanceIndex<'a> {
    /// Build the index over a cloud.
    ///
    /// # Errors
    ///
    /// Returns [`ChamferError::EmptyCloud`] for an empty cloud.
    pub fn new(cloud: &'a SampledCloud) -> ChamferResult<Self> {
        if cloud.is_empty() {
            return Err(ChamferError::EmptyCloud);
        }

        let mut tree: KdTree<f64, 3> = KdTree::new();
        for (i, p) in cloud.points().iter().enumerate() {
            tree.add(&[p.x, p.y, p.z], i as u64);
        }

        Ok(Self { cloud, tree })
    }

    /// The cloud this index queries against.
    #[must_use]
    pub const fn cloud(&self) -> &'a SampledCloud {
        self.cloud
    }

    /// Signed distance from a query point to its nearest neighbor.
    ///
    /// The magnitude is the Euclidean distance; the sign is resolved from
    /// `normal` (falling back to the neighbor's normal when nearly
    /// perpendicular). A query coincident with a neighbor returns a
    /// non-negative zero.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3<f64>, normal: &Vector3<f64>) -> SignedDistance {
        let hit = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[point.x, point.y, point.z]);
        #[allow(clippy::cast_possible_truncation)]
        let nearest = hit.item as usize;
        SignedDistance {
            value: self.resolve_sign(point, normal, nearest, hit.distance.sqrt()),
            nearest,
        }
    }

    /// Signed distances from a query point to its `k` nearest neighbors,
    /// nearest first.
    ///
    /// Returns fewer than `k` entries if the cloud is smaller than `k`.
    #[must_use]
    pub fn signed_distances(
        &self,
        point: &Point3<f64>,
        normal: &Vector3<f64>,
        k: usize,
    ) -> Vec<SignedDistance> {
        let k = k.min(self.cloud.len());
        self.tree
            .nearest_n::<SquaredEuclidean>(&[point.x, point.y, point.z], k)
            .into_iter()
            .map(|hit| {
                #[allow(clippy::cast_possible_truncation)]
                let nearest = hit.item as usize;
                SignedDistance {
                    value: self.resolve_sign(point, normal, nearest, hit.distance.sqrt()),
                    nearest,
                }
            })
            .collect()
    }

    /// Apply the sign rule to one neighbor.
    fn resolve_sign(
        &self,
        point: &Point3<f64>,
        normal: &Vector3<f64>,
        nearest: usize,
        distance: f64,
    ) -> f64 {
        let delta = self.cloud.points()[nearest] - point;
        let mut dot = delta.dot(normal);
        if dot.abs() <= PERPENDICULAR_DOT_THRESHOLD {
            dot = delta.dot(&self.cloud.normals()[nearest]);
        }
        if dot >= 0.0 { distance } else { -distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cloud(points: Vec<Point3<f64>>, normals: Vec<Vector3<f64>>) -> SampledCloud {
        let idxes = vec![0; points.len()];
        SampledCloud::from_parts(points, normals, idxes).unwrap()
    }

    #[test]
    fn empty_cloud_is_rejected() {
        let empty = SampledCloud::default();
        assert!(matches!(
            SignedDistanceIndex::new(&empty),
            Err(ChamferError::EmptyCloud)
        ));
    }

    #[test]
    fn aligned_normal_gives_positive_sign() {
        let target = cloud(vec![Point3::new(0.0, 0.0, 2.0)], vec![Vector3::z()]);
        let index = SignedDistanceIndex::new(&target).unwrap();

        let sd = index.signed_distance(&Point3::origin(), &Vector3::z());
        assert_relative_eq!(sd.value, 2.0, epsilon = 1e-12);
        assert_eq!(sd.nearest, 0);

        // Normal pointing away from the neighbor flips the sign.
        let sd = index.signed_distance(&Point3::origin(), &-Vector3::z());
        assert_relative_eq!(sd.value, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn perpendicular_normal_falls_back_to_neighbor_normal() {
        // Neighbor mostly sideways: the dot with the query normal is 0.1,
        // inside the fallback band, so the neighbor's -Z normal decides.
        let target = cloud(vec![Point3::new(1.0, 0.0, 0.1)], vec![-Vector3::z()]);
        let index = SignedDistanceIndex::new(&target).unwrap();

        let sd = index.signed_distance(&Point3::origin(), &Vector3::z());
        let expected = (1.0_f64 + 0.01).sqrt();
        assert_relative_eq!(sd.value, -expected, epsilon = 1e-12);

        // Same geometry, neighbor normal +Z: sign turns positive.
        let target = cloud(vec![Point3::new(1.0, 0.0, 0.1)], vec![Vector3::z()]);
        let index = SignedDistanceIndex::new(&target).unwrap();
        let sd = index.signed_distance(&Point3::origin(), &Vector3::z());
        assert_relative_eq!(sd.value, expected, epsilon = 1e-12);
    }

    #[test]
    fn coincident_point_is_non_negative_zero() {
        let target = cloud(vec![Point3::new(1.0, 2.0, 3.0)], vec![Vector3::z()]);
        let index = SignedDistanceIndex::new(&target).unwrap();

        let sd = index.signed_distance(&Point3::new(1.0, 2.0, 3.0), &Vector3::z());
        assert_eq!(sd.value, 0.0);
        assert!(sd.value.is_sign_positive());
    }

    #[test]
    fn k_nearest_come_back_nearest_first() {
        let points = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 5.0),
        ];
        let normals = vec![Vector3::z(); 4];
        let target = cloud(points, normals);
        let index = SignedDistanceIndex::new(&target).unwrap();

        let hits = index.signed_distances(&Point3::origin(), &Vector3::z(), 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].nearest, 0);
        assert_eq!(hits[2].nearest, 1);
        assert_relative_eq!(hits[0].value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hits[2].value, 3.0, epsilon = 1e-12);

        // Asking for more neighbors than the cloud holds caps at the cloud size.
        let hits = index.signed_distances(&Point3::origin(), &Vector3::z(), 10);
        assert_eq!(hits.len(), 4);
    }
}
