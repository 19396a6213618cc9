//! Candidate selection parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::classify::{validate_epsilon, SurfaceClass};
use crate::error::CurvatureResult;

/// Parameters for [`find_candidates`](crate::find_candidates).
///
/// # Example
///
/// ```
/// use vertebra_curvature::{CandidateParams, SurfaceClass};
///
/// let params = CandidateParams::default();
/// assert!((params.epsilon - 0.01).abs() < f64::EPSILON);
/// assert_eq!(params.target, SurfaceClass::Flat);
/// assert!(!params.include_unestimated);
///
/// let ridges = CandidateParams::new()
///     .with_epsilon(0.05)
///     .with_target(SurfaceClass::Ridge);
/// assert!(ridges.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CandidateParams {
    /// Half-width of the zero band used when taking curvature signs.
    ///
    /// Default: 0.01
    pub epsilon: f64,

    /// Surface class a vertex must have to become a candidate.
    ///
    /// Default: [`SurfaceClass::Flat`]
    pub target: SurfaceClass,

    /// Also select vertices the curvature field could not estimate, such as
    /// open-boundary vertices. Their placeholder `H = K = 0` classifies as
    /// flat, so a cropped scan would otherwise offer its whole rim.
    ///
    /// Default: false
    pub include_unestimated: bool,
}

impl Default for CandidateParams {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateParams {
    /// Default parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            epsilon: 0.01,
            target: SurfaceClass::Flat,
            include_unestimated: false,
        }
    }

    /// Set the zero band half-width.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the target surface class.
    #[must_use]
    pub const fn with_target(mut self, target: SurfaceClass) -> Self {
        self.target = target;
        self
    }

    /// Set whether unestimated vertices may become candidates.
    #[must_use]
    pub const fn with_include_unestimated(mut self, include: bool) -> Self {
        self.include_unestimated = include;
        self
    }

    /// Check that every parameter lies in its domain.
    ///
    /// # Errors
    ///
    /// Returns [`CurvatureError::InvalidEpsilon`](crate::CurvatureError::InvalidEpsilon)
    /// if `epsilon` is negative or not finite.
    pub fn validate(&self) -> CurvatureResult<()> {
        validate_epsilon(self.epsilon)
    }
}
