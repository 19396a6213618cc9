//! Measurement parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use vertebra_types::LateralAxis;

use crate::error::{CobbError, CobbResult};

/// Parameters for [`grow_region`](crate::grow_region).
///
/// # Example
///
/// ```
/// use cobb_xing::GrowParams;
///
/// let params = GrowParams::default();
/// assert!((params.normal_threshold - 0.5).abs() < f64::EPSILON);
///
/// let tight = GrowParams::new().with_normal_threshold(0.1);
/// assert!(tight.validate().is_ok());
/// assert!(GrowParams::new().with_normal_threshold(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowParams {
    /// A neighbour joins the region when the Euclidean distance between its
    /// unit normal and the seed's unit normal is below this value.
    ///
    /// Unit normals are at most 2 apart, so values above 2 admit every
    /// connected vertex.
    ///
    /// Default: 0.5
    pub normal_threshold: f64,
}

impl Default for GrowParams {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowParams {
    /// Default parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            normal_threshold: 0.5,
        }
    }

    /// Set the normal distance threshold.
    #[must_use]
    pub const fn with_normal_threshold(mut self, threshold: f64) -> Self {
        self.normal_threshold = threshold;
        self
    }

    /// Check that the threshold is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`CobbError::InvalidParameter`] otherwise.
    pub fn validate(&self) -> CobbResult<()> {
        if self.normal_threshold.is_finite() && self.normal_threshold > 0.0 {
            Ok(())
        } else {
            Err(CobbError::invalid_parameter(format!(
                "normal_threshold must be finite and positive, got {}",
                self.normal_threshold
            )))
        }
    }
}

/// Parameters for [`estimate_orientation`](crate::estimate_orientation).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientationParams {
    /// Region growing around the seed.
    pub grow: GrowParams,

    /// Axis pointing left-right in the mesh frame. Its component is removed
    /// from the fitted normal.
    ///
    /// Default: [`LateralAxis::X`]
    pub lateral_axis: LateralAxis,

    /// The fit is rejected when the second singular value is at most this
    /// fraction of the largest. Singular values come from a scatter matrix
    /// eigendecomposition, so collinear points can leave a second value near
    /// `sqrt(f64::EPSILON)` times the largest.
    ///
    /// Default: 1e-6
    pub collinearity_tolerance: f64,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationParams {
    /// Default parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grow: GrowParams::new(),
            lateral_axis: LateralAxis::X,
            collinearity_tolerance: 1e-6,
        }
    }

    /// Set region growing parameters.
    #[must_use]
    pub const fn with_grow(mut self, grow: GrowParams) -> Self {
        self.grow = grow;
        self
    }

    /// Set the normal distance threshold for region growing.
    #[must_use]
    pub const fn with_normal_threshold(mut self, threshold: f64) -> Self {
        self.grow.normal_threshold = threshold;
        self
    }

    /// Set the lateral axis.
    #[must_use]
    pub const fn with_lateral_axis(mut self, axis: LateralAxis) -> Self {
        self.lateral_axis = axis;
        self
    }

    /// Set the collinearity tolerance.
    #[must_use]
    pub const fn with_collinearity_tolerance(mut self, tolerance: f64) -> Self {
        self.collinearity_tolerance = tolerance;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CobbError::InvalidParameter`] for a bad threshold or a
    /// negative or non-finite collinearity tolerance.
    pub fn validate(&self) -> CobbResult<()> {
        self.grow.validate()?;
        if !(self.collinearity_tolerance.is_finite() && self.collinearity_tolerance >= 0.0) {
            return Err(CobbError::invalid_parameter(format!(
                "collinearity_tolerance must be finite and non-negative, got {}",
                self.collinearity_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = OrientationParams::default();
        assert_eq!(params.lateral_axis, LateralAxis::X);
        assert!((params.grow.normal_threshold - 0.5).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_domain_values() {
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let params = OrientationParams::new().with_normal_threshold(bad);
            assert!(matches!(params.validate(), Err(CobbError::InvalidParameter(_))));
        }
        let params = OrientationParams::new().with_collinearity_tolerance(-1.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn builders_compose() {
        let params = OrientationParams::new()
            .with_grow(GrowParams::new().with_normal_threshold(1.5))
            .with_lateral_axis(LateralAxis::Y);
        assert!((params.grow.normal_threshold - 1.5).abs() < f64::EPSILON);
        assert_eq!(params.lateral_axis, LateralAxis::Y);
    }
}
