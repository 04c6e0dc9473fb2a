//! Error type for the comparison pipeline.

use meshdiff_chamfer::ChamferError;
use meshdiff_heatmap::HeatmapError;
use meshdiff_sample::SampleError;
use thiserror::Error;

/// Result type alias for the comparison pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Any failure of a pipeline stage.
///
/// All variants are structural (bad input); nothing in the pipeline is
/// transient or worth retrying.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Surface sampling failed.
    #[error(transparent)]
    Sample(#[from] SampleError),

    /// Distance computation failed.
    #[error(transparent)]
    Chamfer(#[from] ChamferError),

    /// Colorization or baking failed.
    #[error(transparent)]
    Heatmap(#[from] HeatmapError),
}
