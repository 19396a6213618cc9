//! Error types for Cobb angle measurement.

use thiserror::Error;
use vertebra_curvature::CurvatureError;
use vertebra_types::MeshError;

/// Result type alias for measurement operations.
pub type CobbResult<T> = Result<T, CobbError>;

/// Errors that can occur while fitting endplates or computing angles.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CobbError {
    /// Too few points survived region growing and candidate filtering.
    #[error("at least {required} points required for a plane fit, got {actual}")]
    InsufficientPoints {
        /// Number of points required.
        required: usize,
        /// Number of points available.
        actual: usize,
    },

    /// An orientation vector has no direction.
    #[error("orientation vector has zero length")]
    ZeroOrientation,

    /// The fit points do not span a plane.
    #[error("{points} fit points are collinear or coincident")]
    DegenerateGeometry {
        /// Number of points that were fitted.
        points: usize,
    },

    /// A parameter lies outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A pick arrived after the session already produced an angle.
    #[error("pick session already computed an angle; reset it first")]
    SessionComplete,

    /// The scatter matrix eigendecomposition did not converge.
    #[error("eigendecomposition did not converge during plane fit")]
    FitFailed,

    /// Classification failed.
    #[error(transparent)]
    Curvature(#[from] CurvatureError),

    /// The mesh collaborator failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl CobbError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }

    /// Whether the error means a pick did not carry enough geometry to
    /// measure. Exhaustive scans skip such pairs.
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPoints { .. } | Self::ZeroOrientation | Self::DegenerateGeometry { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_grouping() {
        assert!(CobbError::ZeroOrientation.is_insufficient_data());
        assert!(CobbError::DegenerateGeometry { points: 4 }.is_insufficient_data());
        assert!(CobbError::InsufficientPoints {
            required: 3,
            actual: 1
        }
        .is_insufficient_data());

        assert!(!CobbError::invalid_parameter("threshold").is_insufficient_data());
        assert!(!CobbError::SessionComplete.is_insufficient_data());
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err = CobbError::from(CurvatureError::InvalidEpsilon { value: -1.0 });
        assert!(err.to_string().contains("-1"));
        assert!(!err.is_insufficient_data());
    }
}
