//! Sampled point cloud with per-sample provenance.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SampleError, SampleResult};

/// An area-weighted sample of a mesh surface.
///
/// Parallel arrays of sample positions, unit normals, and the index of the
/// face each sample came from. Geometry is immutable after construction;
/// only the derived color array may be set later (by the heatmap stage).
///
/// # Serialization
///
/// With the `serde` feature, a cloud serializes exactly the fields `points`,
/// `normals`, and `triangle_idxes` — the cache schema an external caching
/// layer persists to skip re-sampling. Colors are a derived artifact and are
/// not part of the schema. Deserialized blobs are trusted to satisfy the
/// equal-length invariant (they are produced by serializing a valid cloud).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampledCloud {
    points: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    triangle_idxes: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    colors: Vec<[f64; 3]>,
}

impl SampledCloud {
    /// Build a cloud from its parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::LengthMismatch`] if the arrays disagree in
    /// length.
    pub fn from_parts(
        points: Vec<Point3<f64>>,
        normals: Vec<Vector3<f64>>,
        triangle_idxes: Vec<u32>,
    ) -> SampleResult<Self> {
        if points.len() != normals.len() || points.len() != triangle_idxes.len() {
            return Err(SampleError::LengthMismatch {
                points: points.len(),
                normals: normals.len(),
                triangle_idxes: triangle_idxes.len(),
            });
        }
        Ok(Self {
            points,
            normals,
            triangle_idxes,
            colors: Vec::new(),
        })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the cloud has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample positions.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Sample unit normals.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Origin-face index of every sample.
    #[must_use]
    pub fn triangle_idxes(&self) -> &[u32] {
        &self.triangle_idxes
    }

    /// Position of one sample, or `None` if out of bounds.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point3<f64>> {
        self.points.get(index)
    }

    /// Normal of one sample, or `None` if out of bounds.
    #[must_use]
    pub fn normal(&self, index: usize) -> Option<&Vector3<f64>> {
        self.normals.get(index)
    }

    /// RGB colors in [0, 1], or `None` if the cloud has not been colorized.
    #[must_use]
    pub fn colors(&self) -> Option<&[[f64; 3]]> {
        if self.colors.is_empty() {
            None
        } else {
            Some(&self.colors)
        }
    }

    /// True if the cloud has been colorized.
    #[must_use]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Attach one RGB color per sample.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::ColorCountMismatch`] unless exactly one color
    /// per sample is supplied.
    pub fn set_colors(&mut self, colors: Vec<[f64; 3]>) -> SampleResult<()> {
        if colors.len() != self.points.len() {
            return Err(SampleError::ColorCountMismatch {
                expected: self.points.len(),
                actual: colors.len(),
            });
        }
        self.colors = colors;
        Ok(())
    }

    /// Centroid of the sample positions, or `None` for an empty cloud.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        #[allow(clippy::cast_precision_loss)]
        let centroid = sum / self.points.len() as f64;
        Some(Point3::from(centroid))
    }

    /// Translation that moves this cloud's centroid onto another's.
    ///
    /// This is the coarse alignment step an external registration
    /// collaborator applies before refining with ICP. Returns `None` if
    /// either cloud is empty.
    #[must_use]
    pub fn translation_to(&self, target: &Self) -> Option<Vector3<f64>> {
        Some(target.centroid()? - self.centroid()?)
    }

    /// Translate all sample positions by the given offset.
    ///
    /// Normals are direction vectors and are unaffected.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for point in &mut self.points {
            *point += offset;
        }
    }
}
