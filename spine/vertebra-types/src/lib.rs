//! Vertebra surface mesh model for endplate measurements.
//!
//! This crate provides the read-only mesh layer the Cobb angle pipeline is
//! built on:
//!
//! - [`VertebraMesh`] - An immutable triangle mesh with derived adjacency,
//!   boundary flags and area-weighted vertex normals
//! - [`SurfaceMesh`] - The query trait every measurement algorithm consumes
//! - [`VertexAdjacency`] - Vertex neighbourhoods (vertices sharing a face)
//! - [`LateralAxis`] - Which local axis points left-right
//! - [`VertexLocator`] - Nearest-vertex lookup for picked positions
//!
//! # Layer 0 Crate
//!
//! No rendering or UI dependencies. Meshes are constructed from plain
//! positions and faces, usually via `vertebra-io`.
//!
//! # Coordinate System
//!
//! The crate is unit-agnostic and frame-agnostic. The only frame assumption
//! the measurement makes is the lateral axis, and that is passed explicitly
//! as a [`LateralAxis`] rather than read from a fixed position.
//!
//! # Example
//!
//! ```
//! use vertebra_types::{LateralAxis, SurfaceMesh, VertebraMesh};
//!
//! let mesh = VertebraMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.adjacent_vertices(0), &[1, 2, 3]);
//!
//! let normal = mesh.vertex_normal(0).unwrap();
//! let sagittal = LateralAxis::X.project_sagittal(&normal);
//! assert!((sagittal.z - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod axis;
mod error;
mod locator;
mod mesh;
mod traits;

pub use adjacency::VertexAdjacency;
pub use axis::LateralAxis;
pub use error::{MeshError, MeshResult};
pub use locator::{NearestVertex, VertexLocator};
pub use mesh::VertebraMesh;
pub use traits::SurfaceMesh;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
