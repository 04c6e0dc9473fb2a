//! Error types for distance computation.

use thiserror::Error;

/// Result type alias for distance operations.
pub type ChamferResult<T> = Result<T, ChamferError>;

/// Errors that can occur during signed-distance computation.
#[derive(Debug, Error)]
pub enum ChamferError {
    /// The source cloud has no points.
    #[error("source cloud has no points")]
    EmptySourceCloud,

    /// The target cloud has no points.
    #[error("target cloud has no points")]
    EmptyTargetCloud,

    /// A distance index cannot be built over an empty cloud.
    #[error("cannot build a distance index over an empty cloud")]
    EmptyCloud,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert!(format!("{}", ChamferError::EmptySourceCloud).contains("source"));
        assert!(format!("{}", ChamferError::EmptyTargetCloud).contains("target"));
        assert!(format!("{}", ChamferError::EmptyCloud).contains("empty"));
    }
}
