//! Cobb angle from two endplate orientations.

use crate::error::{CobbError, CobbResult};
use crate::orientation::OrientationVector;

/// Vectors shorter than this have no usable direction.
const ZERO_LENGTH: f64 = 1e-12;

/// Cobb angle in degrees between two endplate orientations.
///
/// Returns `180° − θ` where `θ` is the angle between the vectors. Facing
/// endplates have roughly opposite outward normals, so parallel endplates
/// measure 0° and the result grows with the wedge between them. The cosine
/// ratio is clamped to `[-1, 1]` before the inverse cosine.
///
/// # Errors
///
/// Returns [`CobbError::ZeroOrientation`] if either vector has zero length.
///
/// # Example
///
/// ```
/// use cobb_xing::{cobb_angle, OrientationVector};
/// use vertebra_types::Vector3;
///
/// let up = OrientationVector::new(Vector3::new(0.0, 1.0, 0.0));
/// let down = OrientationVector::new(Vector3::new(0.0, -1.0, 0.0));
/// assert!(cobb_angle(&up, &down).unwrap().abs() < 1e-12);
///
/// let zero = OrientationVector::new(Vector3::zeros());
/// assert!(cobb_angle(&up, &zero).is_err());
/// ```
pub fn cobb_angle(v1: &OrientationVector, v2: &OrientationVector) -> CobbResult<f64> {
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1.is_nan() || n2.is_nan() || n1 <= ZERO_LENGTH || n2 <= ZERO_LENGTH {
        return Err(CobbError::ZeroOrientation);
    }

    let ratio = (v1.as_vector().dot(v2.as_vector()) / (n1 * n2)).clamp(-1.0, 1.0);
    Ok(180.0 - ratio.acos().to_degrees())
}
