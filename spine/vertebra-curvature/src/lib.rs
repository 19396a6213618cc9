//! Curvature-based surface classification for vertebra meshes.
//!
//! This crate turns per-vertex curvature into the candidate vertex set the
//! endplate measurement fits planes to:
//!
//! - [`compute_curvature`] - Discrete mean and Gaussian curvature
//! - [`classify`] / [`classify_field`] - Map `(H, K, ε)` to a [`SurfaceClass`]
//! - [`select_candidates`] / [`find_candidates`] - Collect the vertices of one
//!   class into a [`CandidateSet`]
//!
//! # Surface Classes
//!
//! | sign H \ sign K | K > 0 | K = 0 | K < 0 |
//! |-----------------|-------|-------|-------|
//! | H < 0 | 1 negative elliptic | 2 ridge | 3 saddle ridge |
//! | H = 0 | 4 none | 5 flat | 6 minimal surface |
//! | H > 0 | 7 positive elliptic | 8 positive parabolic | 9 positive hyperbolic |
//!
//! Signs use a dead band: any value within `[-ε, ε]` counts as zero.
//!
//! # Layer 0 Crate
//!
//! Depends only on `vertebra-types`. Curvature computed elsewhere can be
//! supplied through [`CurvatureField::from_parts`].
//!
//! # Example
//!
//! ```
//! use vertebra_curvature::{compute_curvature, find_candidates, CandidateParams};
//! use vertebra_types::VertebraMesh;
//!
//! let mesh = VertebraMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! )
//! .unwrap();
//!
//! let field = compute_curvature(&mesh);
//!
//! // A lone square is all boundary, so nothing has a curvature estimate
//! let flat = find_candidates(&field, &CandidateParams::default()).unwrap();
//! assert!(flat.is_empty());
//!
//! let params = CandidateParams::new().with_include_unestimated(true);
//! let flat = find_candidates(&field, &params).unwrap();
//! assert_eq!(flat.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
// Float comparisons are explicit tolerance checks
#![allow(clippy::float_cmp)]

mod candidates;
mod classify;
mod error;
mod field;
mod params;

pub use candidates::{find_candidates, select_candidates, CandidateSet};
pub use classify::{
    classify, classify_field, tolerance_sign, validate_epsilon, CurvatureSign, SurfaceClass,
};
pub use error::{CurvatureError, CurvatureResult};
pub use field::{compute_curvature, CurvatureField};
pub use params::CandidateParams;
