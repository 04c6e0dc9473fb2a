//! Area-weighted uniform surface sampling.

use meshdiff_types::{IndexedMesh, MeshTopology, Triangle};
use nalgebra::{Point3, Vector3};
use rand::Rng;
use tracing::debug;

use crate::barycentric::{DEGENERATE_EPSILON, barycentric, blend_vectors};
use crate::cloud::SampledCloud;
use crate::error::{SampleError, SampleResult};

/// Sample a mesh surface into an area-weighted uniform point cloud.
///
/// The sample budget is split across faces proportionally to their share of
/// the total surface area (truncated), with **every face receiving at least
/// one sample** — so the output holds at least `mesh.face_count()` samples
/// and may exceed `total_samples`. A face with exactly one sample
/// contributes its centroid; faces with more use the square-root transform
/// for uniform placement. Each sample carries the barycentric blend of its
/// face's vertex normals, re-normalized to unit length, and the index of the
/// face it came from.
///
/// Per-face counts are deterministic; positions depend on `rng`, so pass a
/// seeded generator for reproducible clouds.
///
/// # Errors
///
/// - [`SampleError::EmptyMesh`] if the mesh has no vertices or faces.
/// - [`SampleError::MissingNormals`] if any face corner lacks a vertex
///   normal.
///
/// # Example
///
/// ```
/// use meshdiff_sample::sample_surface;
/// use meshdiff_types::unit_square;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let cloud = sample_surface(&unit_square(), 500, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert!(cloud.len() >= 500);
/// ```
pub fn sample_surface(
    mesh: &IndexedMesh,
    total_samples: usize,
    rng: &mut impl Rng,
) -> SampleResult<SampledCloud> {
    if mesh.is_empty() {
        return Err(SampleError::EmptyMesh);
    }
    if !mesh.has_vertex_normals() {
        return Err(SampleError::MissingNormals);
    }

    let areas = mesh.face_areas();
    let counts = allocate_samples(&areas, total_samples);
    let capacity: usize = counts.iter().sum();

    let mut points = Vec::with_capacity(capacity);
    let mut normals = Vec::with_capacity(capacity);
    let mut triangle_idxes = Vec::with_capacity(capacity);

    for (face_index, &count) in counts.iter().enumerate() {
        let tri = mesh
            .triangle(face_index)
            .ok_or(SampleError::EmptyMesh)?;
        let [n0, n1, n2] = mesh
            .face_vertex_normals(face_index)
            .ok_or(SampleError::MissingNormals)?;

        for _ in 0..count {
            let point = if count == 1 {
                tri.centroid()
            } else {
                sample_point_in_triangle(&tri, rng)
            };

            let weights = barycentric(&tri, &point);
            let normal = sanitize_normal(blend_vectors(weights, &n0, &n1, &n2));

            points.push(point);
            normals.push(normal);
            #[allow(clippy::cast_possible_truncation)]
            // Face counts are bounded by the u32 indices in `faces`
            triangle_idxes.push(face_index as u32);
        }
    }

    debug!(
        faces = mesh.face_count(),
        requested = total_samples,
        produced = points.len(),
        "sampled mesh surface"
    );

    SampledCloud::from_parts(points, normals, triangle_idxes)
}

/// Split a sample budget across faces proportionally to area.
///
/// Truncating division of each face's area share, floored at one sample per
/// face. If the total area is not positive (an all-degenerate mesh) every
/// face falls back to a single centroid sample.
fn allocate_samples(areas: &[f64], total_samples: usize) -> Vec<usize> {
    let total_area: f64 = areas.iter().sum();
    if total_area <= 0.0 {
        return vec![1; areas.len()];
    }

    #[allow(clippy::cast_precision_loss)]
    let budget = total_samples as f64;
    areas
        .iter()
        .map(|area| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            // Truncation is the allocation policy; the share is non-negative
            let count = (area / total_area * budget) as usize;
            count.max(1)
        })
        .collect()
}

/// Uniform random point inside a triangle via the square-root transform.
fn sample_point_in_triangle(tri: &Triangle, rng: &mut impl Rng) -> Point3<f64> {
    let r1 = rng.gen_range(0.0_f64..1.0).sqrt();
    let r2 = rng.gen_range(0.0_f64..1.0);
    let u = 1.0 - r1;
    let v = r1 * (1.0 - r2);
    let w = r1 * r2;
    Point3::from(u * tri.v0.coords + v * tri.v1.coords + w * tri.v2.coords)
}

/// Force a blended normal into a well-defined unit vector.
///
/// Non-finite components are replaced (NaN → epsilon, ±∞ → ±1) and a
/// near-zero magnitude is bumped to an epsilon vector before normalizing,
/// so the result is always finite and unit-length even for degenerate
/// geometry or cancelling vertex normals.
fn sanitize_normal(blended: Vector3<f64>) -> Vector3<f64> {
    let mut n = blended.map(|c| {
        if c.is_nan() {
            DEGENERATE_EPSILON
        } else if c == f64::INFINITY {
            1.0
        } else if c == f64::NEG_INFINITY {
            -1.0
        } else {
            c
        }
    });

    if n.norm() < DEGENERATE_EPSILON {
        n = Vector3::repeat(DEGENERATE_EPSILON);
    }

    n.normalize()
}
