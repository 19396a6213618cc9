//! Error types for curvature classification.

use thiserror::Error;

/// Result type for curvature operations.
pub type CurvatureResult<T> = Result<T, CurvatureError>;

/// Errors that can occur while building curvature fields or classifying
/// vertices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurvatureError {
    /// The classification tolerance is negative or not finite.
    #[error("epsilon must be finite and non-negative, got {value}")]
    InvalidEpsilon {
        /// The rejected tolerance.
        value: f64,
    },

    /// A surface class code outside 1..=9.
    #[error("surface class code {code} is outside 1..=9")]
    InvalidSurfaceClass {
        /// The rejected code.
        code: u8,
    },

    /// Mean and Gaussian curvature arrays differ in length.
    #[error("mean curvature has {mean} values but Gaussian curvature has {gaussian}")]
    LengthMismatch {
        /// Number of mean curvature values.
        mean: usize,
        /// Number of Gaussian curvature values.
        gaussian: usize,
    },

    /// A curvature value is NaN or infinite.
    #[error("curvature at vertex {vertex} is not finite")]
    NonFiniteCurvature {
        /// Vertex carrying the value.
        vertex: usize,
    },

    /// A candidate id is not a vertex of the mesh.
    #[error("vertex id {id} is out of range (mesh has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// The rejected id.
        id: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl CurvatureError {
    /// Whether the error stems from a parameter outside its domain, as
    /// opposed to malformed curvature input.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidEpsilon { .. } | Self::InvalidSurfaceClass { .. }
        )
    }
}
