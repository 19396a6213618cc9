//! Vertebra mesh loading.
//!
//! Reads ASCII and binary STL files into a [`VertebraMesh`]:
//!
//! - [`load_stl`] - Load with default parameters
//! - [`load_stl_with`] - Load with explicit [`LoadParams`]
//! - [`read_stl`] - Parse STL bytes already in memory
//!
//! STL is a triangle soup. Corners within [`LoadParams::weld_epsilon`] of each
//! other are merged so the mesh has shared vertices, and faces that collapse
//! during welding are dropped.
//!
//! # Example
//!
//! ```
//! use vertebra_io::{read_stl, LoadParams};
//! use vertebra_types::SurfaceMesh;
//!
//! let stl = b"solid square
//! facet normal 0 0 1
//!  outer loop
//!   vertex 0 0 0
//!   vertex 1 0 0
//!   vertex 1 1 0
//!  endloop
//! endfacet
//! facet normal 0 0 1
//!  outer loop
//!   vertex 0 0 0
//!   vertex 1 1 0
//!   vertex 0 1 0
//!  endloop
//! endfacet
//! endsolid square
//! ";
//!
//! let mesh = read_stl(stl, &LoadParams::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.face_count(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod stl;
mod weld;

use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vertebra_types::VertebraMesh;

pub use error::{IoError, IoResult};

/// Parameters for mesh loading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadParams {
    /// Corners closer than this are merged into one vertex. Zero merges only
    /// identical positions.
    ///
    /// Default: 1e-6
    pub weld_epsilon: f64,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadParams {
    /// Default parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self { weld_epsilon: 1e-6 }
    }

    /// Set the weld tolerance.
    #[must_use]
    pub const fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Check the weld tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidWeldEpsilon`] if it is negative or not
    /// finite.
    pub fn validate(&self) -> IoResult<()> {
        if self.weld_epsilon.is_finite() && self.weld_epsilon >= 0.0 {
            Ok(())
        } else {
            Err(IoError::InvalidWeldEpsilon {
                value: self.weld_epsilon,
            })
        }
    }
}

/// Load a vertebra mesh from an STL file with default parameters.
///
/// # Errors
///
/// See [`load_stl_with`].
///
/// # Example
///
/// ```no_run
/// use vertebra_io::load_stl;
///
/// let mesh = load_stl("L1.stl").unwrap();
/// println!("{} faces", mesh.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<VertebraMesh> {
    load_stl_with(path, &LoadParams::default())
}

/// Load a vertebra mesh from an STL file.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if the path does not exist
/// - [`IoError::Io`] for other read failures
/// - Any error from [`read_stl`]
pub fn load_stl_with<P: AsRef<Path>>(path: P, params: &LoadParams) -> IoResult<VertebraMesh> {
    let path = path.as_ref();
    params.validate()?;

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mesh = read_stl(&bytes, params)?;
    info!(
        path = %path.display(),
        vertices = mesh.positions().len(),
        faces = mesh.face_count(),
        "Loaded vertebra mesh"
    );
    Ok(mesh)
}

/// Parse STL bytes and weld them into a mesh.
///
/// # Errors
///
/// - [`IoError::InvalidWeldEpsilon`] if `params` fail validation
/// - [`IoError::InvalidContent`], [`IoError::TruncatedBinary`] or
///   [`IoError::ParseFloat`] for malformed STL
/// - [`IoError::Mesh`] if no usable faces remain
pub fn read_stl(bytes: &[u8], params: &LoadParams) -> IoResult<VertebraMesh> {
    params.validate()?;

    let soup = stl::parse_stl(bytes)?;
    let welded = weld::weld(&soup.triangles, params.weld_epsilon);

    if welded.collapsed > 0 {
        warn!(
            collapsed = welded.collapsed,
            "Dropped faces that collapsed during welding"
        );
    }
    debug!(
        soup_triangles = soup.triangles.len(),
        vertices = welded.positions.len(),
        "Welded STL soup"
    );

    Ok(VertebraMesh::new(welded.positions, welded.faces)?)
}
