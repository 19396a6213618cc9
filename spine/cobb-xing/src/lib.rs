//! Cobb angle measurement from vertebra surface meshes.
//!
//! Measures the angle between the endplates of two vertebrae without manual
//! endplate digitization. Given one seed vertex near an endplate on each
//! mesh, the endplate surface is delineated automatically and a plane is
//! fitted to it:
//!
//! 1. [`grow_region`] flood-fills vertices whose normals stay close to the
//!    seed's normal
//! 2. The region is intersected with the curvature [`CandidateSet`]
//!    (vertices classified flat by `vertebra-curvature`)
//! 3. [`estimate_orientation`] fits a least squares plane to the remaining points
//!    and projects its normal onto the sagittal plane
//! 4. [`cobb_angle`] compares two orientations
//!
//! [`xing2017`] runs this for one pair of picks, [`scan_all`] for every pair
//! of candidate seeds, and [`PickSession`] drives it from clicked positions.
//!
//! # Frame Contract
//!
//! The sagittal projection removes the component along
//! [`OrientationParams::lateral_axis`]. Both meshes must be supplied in a
//! frame where that axis points left-right.
//!
//! # Errors
//!
//! [`CobbError::is_insufficient_data`] identifies picks that carry too
//! little geometry to measure. Exhaustive scans skip those pairs; single-pair
//! measurement reports them.
//!
//! # Example
//!
//! ```
//! use cobb_xing::{xing2017, OrientationParams, Selection};
//! use vertebra_curvature::{compute_curvature, find_candidates, CandidateParams};
//! use vertebra_types::VertebraMesh;
//!
//! // Lower endplate of the upper vertebra, facing down
//! let upper = VertebraMesh::from_raw(
//!     &[0.0, 0.0, 30.0, 10.0, 0.0, 30.0, 10.0, 10.0, 30.0, 0.0, 10.0, 30.0],
//!     &[0, 2, 1, 0, 3, 2],
//! )
//! .unwrap();
//! // Upper endplate of the lower vertebra, facing up
//! let lower = VertebraMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! )
//! .unwrap();
//!
//! // Both squares are all rim, so let boundary vertices through
//! let params = CandidateParams::new().with_include_unestimated(true);
//! let upper_flat = find_candidates(&compute_curvature(&upper), &params).unwrap();
//! let lower_flat = find_candidates(&compute_curvature(&lower), &params).unwrap();
//!
//! let degrees = xing2017(
//!     &Selection::new(&upper, 0, &upper_flat).unwrap(),
//!     &Selection::new(&lower, 0, &lower_flat).unwrap(),
//!     &OrientationParams::default(),
//! )
//! .unwrap();
//! assert!(degrees.abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions)]

mod angle;
mod error;
mod measure;
mod orientation;
mod params;
mod pick;
mod region;
mod scan;
mod selection;

pub use angle::cobb_angle;
pub use error::{CobbError, CobbResult};
pub use measure::xing2017;
pub use orientation::{
    estimate_orientation, fit_endplate, EndplateFit, OrientationVector, MIN_FIT_POINTS,
};
pub use params::{GrowParams, OrientationParams};
pub use pick::{snap_to_candidate, PickOutcome, PickSession, PickState};
pub use region::{grow_region, Region};
pub use scan::{scan_all, PairAngle, ScanResult};
pub use selection::Selection;

pub use vertebra_curvature::CandidateSet;
