//! Error types for vertebra mesh construction.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or querying a vertebra mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// The mesh has no vertices or no faces.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidFaceIndex {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The mesh has more vertices than a `u32` id can address.
    #[error("mesh has {count} vertices, more than u32 ids can address")]
    TooManyVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A flat coordinate or index buffer is not a multiple of three.
    #[error("{buffer} buffer length {len} is not a multiple of 3")]
    MalformedBuffer {
        /// Which buffer was malformed.
        buffer: &'static str,
        /// Its length.
        len: usize,
    },

    /// An axis index or name does not denote x, y or z.
    #[error("invalid lateral axis '{axis}' (expected x, y, z or 0, 1, 2)")]
    InvalidAxis {
        /// The rejected axis designation.
        axis: String,
    },
}
