//! Error types for colorization and baking.

use meshdiff_sample::SampleError;
use thiserror::Error;

/// Result type alias for heatmap operations.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Errors that can occur during colorization or texture baking.
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// A breakpoint array must have exactly one entry per palette color.
    #[error("expected {expected} breakpoints, got {actual}")]
    BreakpointCountMismatch {
        /// Palette length.
        expected: usize,
        /// Breakpoints supplied.
        actual: usize,
    },

    /// The distance field does not match the cloud it colorizes.
    #[error("distance field has {actual} values for a cloud of {expected} points")]
    DistanceCountMismatch {
        /// Points in the cloud.
        expected: usize,
        /// Values in the field.
        actual: usize,
    },

    /// Texture baking needs wedge UVs on the mesh.
    #[error("mesh has no wedge UVs; texture baking requires a UV-mapped mesh")]
    MissingUvs,

    /// Baking needs a colorized cloud.
    #[error("cloud has no colors; colorize it before baking")]
    MissingColors,

    /// The cloud has no samples.
    #[error("cloud has no samples")]
    EmptyCloud,

    /// Texture dimension must be at least one texel.
    #[error("invalid texture dimension {0}")]
    InvalidTextureDim(u32),

    /// A sample references a face the mesh does not have; the cloud was
    /// sampled from a different mesh.
    #[error("sample references face {face} but the mesh has {face_count} faces")]
    FaceOutOfBounds {
        /// Referenced face index.
        face: usize,
        /// Faces in the mesh.
        face_count: usize,
    },

    /// A cloud operation failed.
    #[error(transparent)]
    Cloud(#[from] SampleError),
}
