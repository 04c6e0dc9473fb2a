//! Error types for sampling operations.

use thiserror::Error;

/// Result type alias for sampling operations.
pub type SampleResult<T> = Result<T, SampleError>;

/// Errors that can occur while building or manipulating a sampled cloud.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Input mesh has no vertices or no faces.
    #[error("input mesh is empty")]
    EmptyMesh,

    /// Sampling needs a normal on every vertex; at least one is missing.
    #[error("input mesh is missing vertex normals")]
    MissingNormals,

    /// The parallel arrays of a cloud do not have matching lengths.
    #[error(
        "cloud arrays disagree in length: {points} points, {normals} normals, \
         {triangle_idxes} triangle indices"
    )]
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of normals.
        normals: usize,
        /// Number of origin-face indices.
        triangle_idxes: usize,
    },

    /// A color array was supplied with the wrong number of entries.
    #[error("expected {expected} colors, got {actual}")]
    ColorCountMismatch {
        /// Number of points in the cloud.
        expected: usize,
        /// Number of colors supplied.
        actual: usize,
    },
}
