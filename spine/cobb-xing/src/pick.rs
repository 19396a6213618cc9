//! Two-pick measurement session.
//!
//! Interactive front ends report one clicked position at a time. The first
//! pick lands on the superior vertebra, the second on the inferior one, and
//! the second pick triggers the measurement:
//!
//! ```text
//! Idle --pick--> AwaitingSecondPick --pick--> Computed --reset--> Idle
//! ```
//!
//! A pick in `Computed` is rejected until [`PickSession::reset`] is called.

use std::fmt;

use tracing::{debug, info};
use vertebra_curvature::CandidateSet;
use vertebra_types::{NearestVertex, Point3, SurfaceMesh, VertexLocator};

use crate::error::{CobbError, CobbResult};
use crate::measure::xing2017;
use crate::params::OrientationParams;
use crate::selection::Selection;

/// Snap a picked position to the closest candidate vertex.
///
/// # Errors
///
/// Returns [`CobbError::InsufficientPoints`] if the candidate set is empty.
///
/// # Example
///
/// ```
/// use cobb_xing::snap_to_candidate;
/// use vertebra_curvature::CandidateSet;
/// use vertebra_types::{Point3, VertebraMesh};
///
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2, 0, 2, 3],
/// )
/// .unwrap();
/// let candidates = CandidateSet::from_ids(4, [0, 3]).unwrap();
///
/// let hit = snap_to_candidate(&mesh, &candidates, &Point3::new(0.9, 0.9, 0.0)).unwrap();
/// assert_eq!(hit.id, 3);
/// ```
pub fn snap_to_candidate<M: SurfaceMesh + ?Sized>(
    mesh: &M,
    candidates: &CandidateSet,
    position: &Point3<f64>,
) -> CobbResult<NearestVertex> {
    let locator = VertexLocator::from_ids(mesh, candidates.sorted_ids());
    snap_with(&locator, position)
}

fn snap_with(locator: &VertexLocator, position: &Point3<f64>) -> CobbResult<NearestVertex> {
    locator.nearest(position).ok_or(CobbError::InsufficientPoints {
        required: 1,
        actual: 0,
    })
}

/// Where a [`PickSession`] stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickState {
    /// No pick yet.
    Idle,
    /// The superior endplate was picked.
    AwaitingSecondPick {
        /// Snapped seed on the superior mesh.
        superior_seed: u32,
    },
    /// Both endplates were picked and measured.
    Computed {
        /// Snapped seed on the superior mesh.
        superior_seed: u32,
        /// Snapped seed on the inferior mesh.
        inferior_seed: u32,
        /// Cobb angle in degrees.
        degrees: f64,
    },
}

/// What a call to [`PickSession::pick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// The superior seed was stored; one more pick is needed.
    Stored(NearestVertex),
    /// The inferior seed completed the session.
    Measured {
        /// Snapped seed on the inferior mesh.
        seed: NearestVertex,
        /// Cobb angle in degrees.
        degrees: f64,
    },
}

/// Two-slot pick state machine over a superior and an inferior vertebra.
///
/// Positions are snapped to the nearest candidate of the mesh being picked.
/// A failed measurement leaves the session waiting for the second pick, so
/// the user can try a different spot.
pub struct PickSession<'a, M: ?Sized> {
    superior: &'a M,
    superior_candidates: &'a CandidateSet,
    superior_locator: VertexLocator,
    inferior: &'a M,
    inferior_candidates: &'a CandidateSet,
    inferior_locator: VertexLocator,
    params: OrientationParams,
    state: PickState,
}

impl<'a, M: SurfaceMesh + ?Sized> PickSession<'a, M> {
    /// Start an idle session.
    ///
    /// # Errors
    ///
    /// Returns [`CobbError::InvalidParameter`] if `params` fail validation.
    pub fn new(
        superior: &'a M,
        superior_candidates: &'a CandidateSet,
        inferior: &'a M,
        inferior_candidates: &'a CandidateSet,
        params: OrientationParams,
    ) -> CobbResult<Self> {
        params.validate()?;

        Ok(Self {
            superior,
            superior_candidates,
            superior_locator: VertexLocator::from_ids(superior, superior_candidates.sorted_ids()),
            inferior,
            inferior_candidates,
            inferior_locator: VertexLocator::from_ids(inferior, inferior_candidates.sorted_ids()),
            params,
            state: PickState::Idle,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PickState {
        self.state
    }

    /// The measured angle, once computed.
    #[must_use]
    pub const fn degrees(&self) -> Option<f64> {
        match self.state {
            PickState::Computed { degrees, .. } => Some(degrees),
            _ => None,
        }
    }

    /// Feed one picked position.
    ///
    /// # Errors
    ///
    /// - [`CobbError::SessionComplete`] if an angle was already computed
    /// - [`CobbError::InsufficientPoints`] if the mesh being picked has no
    ///   candidates
    /// - Any measurement error from [`xing2017`] on the second pick
    pub fn pick(&mut self, position: &Point3<f64>) -> CobbResult<PickOutcome> {
        match self.state {
            PickState::Idle => {
                let hit = snap_with(&self.superior_locator, position)?;
                debug!(seed = hit.id, distance = hit.distance, "Stored superior pick");
                self.state = PickState::AwaitingSecondPick {
                    superior_seed: hit.id,
                };
                Ok(PickOutcome::Stored(hit))
            }
            PickState::AwaitingSecondPick { superior_seed } => {
                let hit = snap_with(&self.inferior_locator, position)?;
                let upper = Selection::new(self.superior, superior_seed, self.superior_candidates)?;
                let lower = Selection::new(self.inferior, hit.id, self.inferior_candidates)?;
                let degrees = xing2017(&upper, &lower, &self.params)?;

                info!(superior_seed, inferior_seed = hit.id, degrees, "Pick session complete");
                self.state = PickState::Computed {
                    superior_seed,
                    inferior_seed: hit.id,
                    degrees,
                };
                Ok(PickOutcome::Measured { seed: hit, degrees })
            }
            PickState::Computed { .. } => Err(CobbError::SessionComplete),
        }
    }

    /// Return to `Idle`, discarding any stored pick or result.
    pub fn reset(&mut self) {
        self.state = PickState::Idle;
    }
}

impl<M: ?Sized> fmt::Debug for PickSession<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickSession")
            .field("state", &self.state)
            .field("superior_candidates", &self.superior_locator.len())
            .field("inferior_candidates", &self.inferior_locator.len())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
