//! Barycentric coordinates and attribute interpolation.
//!
//! Converts 3D points lying on (or near) a triangle into barycentric weights
//! `(u, v, w)` with `u + v + w = 1`, and blends per-corner attributes at
//! those weights. Used by the sampler to interpolate normals and by the
//! texture baker to recover wedge UVs.

use meshdiff_types::{IndexedMesh, MeshTopology, Triangle};
use nalgebra::{Point3, Vector3};

/// Threshold below which a denominator or magnitude counts as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Replace a non-finite or near-zero denominator with a safe stand-in.
///
/// NaN becomes the epsilon, ±∞ clamps to ±1, and anything with magnitude
/// below the epsilon is bumped up to it. Division by the result is always
/// finite.
fn sanitize_denominator(denom: f64) -> f64 {
    let d = if denom.is_nan() {
        DEGENERATE_EPSILON
    } else if denom == f64::INFINITY {
        1.0
    } else if denom == f64::NEG_INFINITY {
        -1.0
    } else {
        denom
    };

    if d.abs() < DEGENERATE_EPSILON {
        DEGENERATE_EPSILON
    } else {
        d
    }
}

/// Barycentric coordinates of a point with respect to a triangle.
///
/// Projection-based solve on the triangle's edge vectors. The returned
/// weights satisfy `u + v + w = 1` and reconstruct the point for any
/// non-degenerate triangle (see [`point_from_barycentric`]). For a
/// degenerate (near-zero-area) triangle the denominator is epsilon-clamped,
/// so the result is finite but geometrically meaningless; no error is
/// raised.
///
/// # Example
///
/// ```
/// use meshdiff_sample::barycentric;
/// use meshdiff_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let (u, v, w) = barycentric(&tri, &tri.centroid());
/// assert!((u - 1.0 / 3.0).abs() < 1e-12);
/// assert!((u + v + w - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn barycentric(tri: &Triangle, point: &Point3<f64>) -> (f64, f64, f64) {
    let e1 = tri.v1 - tri.v0;
    let e2 = tri.v2 - tri.v0;
    let ep = point - tri.v0;

    let d00 = e1.dot(&e1);
    let d01 = e1.dot(&e2);
    let d11 = e2.dot(&e2);
    let d20 = ep.dot(&e1);
    let d21 = ep.dot(&e2);

    let denom = sanitize_denominator(d00.mul_add(d11, -(d01 * d01)));

    let v = d11.mul_add(d20, -(d01 * d21)) / denom;
    let w = d00.mul_add(d21, -(d01 * d20)) / denom;
    let u = 1.0 - v - w;
    (u, v, w)
}

/// Barycentric coordinates of a point with respect to a mesh face.
///
/// Returns `None` if the face index is out of bounds.
#[must_use]
pub fn barycentric_in_face(
    mesh: &IndexedMesh,
    point: &Point3<f64>,
    face_index: usize,
) -> Option<(f64, f64, f64)> {
    let tri = mesh.triangle(face_index)?;
    Some(barycentric(&tri, point))
}

/// Reconstruct a point from barycentric weights and a triangle.
///
/// The inverse of [`barycentric`] for points in the triangle's plane.
#[must_use]
pub fn point_from_barycentric(tri: &Triangle, (u, v, w): (f64, f64, f64)) -> Point3<f64> {
    Point3::from(u * tri.v0.coords + v * tri.v1.coords + w * tri.v2.coords)
}

/// Blend three per-corner vectors at the given barycentric weights.
#[inline]
#[must_use]
pub fn blend_vectors(
    (u, v, w): (f64, f64, f64),
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
) -> Vector3<f64> {
    u * a + v * b + w * c
}

/// Blend three per-corner UVs at the given barycentric weights.
#[inline]
#[must_use]
pub fn blend_uvs((u, v, w): (f64, f64, f64), a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> [f64; 2] {
    [
        u.mul_add(a[0], v.mul_add(b[0], w * c[0])),
        u.mul_add(a[1], v.mul_add(b[1], w * c[1])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshdiff_types::unit_square;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn reference_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn weights_at_vertices() {
        let tri = reference_triangle();
        let (u, v, w) = barycentric(&tri, &tri.v0);
        assert_relative_eq!(u, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v, 0.0, epsilon = 1e-12);
        assert_relative_eq!(w, 0.0, epsilon = 1e-12);

        let (u, v, _) = barycentric(&tri, &tri.v1);
        assert_relative_eq!(u, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn round_trip_random_interior_points() {
        let tri = Triangle::new(
            Point3::new(-1.0, 2.0, 0.5),
            Point3::new(3.0, -0.5, 1.0),
            Point3::new(0.0, 1.0, -2.0),
        );
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            // Uniform interior point via the square-root transform.
            let r1 = rng.gen_range(0.0_f64..1.0).sqrt();
            let r2 = rng.gen_range(0.0_f64..1.0);
            let weights = (1.0 - r1, r1 * (1.0 - r2), r1 * r2);
            let point = point_from_barycentric(&tri, weights);

            let (u, v, w) = barycentric(&tri, &point);
            assert_relative_eq!(u + v + w, 1.0, epsilon = 1e-9);
            let rebuilt = point_from_barycentric(&tri, (u, v, w));
            assert_relative_eq!((rebuilt - point).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn degenerate_triangle_stays_finite() {
        // Collinear vertices: zero area, zero denominator.
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        let (u, v, w) = barycentric(&tri, &Point3::new(0.5, 0.5, 0.0));
        assert!(u.is_finite());
        assert!(v.is_finite());
        assert!(w.is_finite());
        assert_relative_eq!(u + v + w, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_size_triangle_stays_finite() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let tri = Triangle::new(p, p, p);
        let (u, v, w) = barycentric(&tri, &Point3::new(0.0, 0.0, 0.0));
        assert!(u.is_finite() && v.is_finite() && w.is_finite());
    }

    #[test]
    fn face_lookup() {
        let square = unit_square();
        let center = Point3::new(0.5, 0.25, 0.0);
        let (u, v, w) = barycentric_in_face(&square, &center, 0).unwrap();
        assert_relative_eq!(u + v + w, 1.0, epsilon = 1e-12);
        assert!(barycentric_in_face(&square, &center, 5).is_none());
    }

    #[test]
    fn uv_blend_matches_weights() {
        let uv = blend_uvs(
            (0.5, 0.25, 0.25),
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
        );
        assert_relative_eq!(uv[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(uv[1], 0.25, epsilon = 1e-12);
    }
}
