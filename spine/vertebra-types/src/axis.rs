//! The left-right axis of a vertebra's local frame.
//!
//! Endplate orientations are compared in the sagittal plane, which is the
//! plane orthogonal to the patient's left-right axis. Meshes come in whatever
//! frame the scanner or segmentation produced, so the axis that points
//! left-right has to be stated rather than assumed.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Coordinate axis pointing left-right in the mesh's local frame.
///
/// # Example
///
/// ```
/// use vertebra_types::{LateralAxis, Vector3};
///
/// let normal = Vector3::new(0.3, 0.1, 0.9);
/// let sagittal = LateralAxis::X.project_sagittal(&normal);
/// assert_eq!(sagittal, Vector3::new(0.0, 0.1, 0.9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LateralAxis {
    /// Axis index 0.
    #[default]
    X,
    /// Axis index 1.
    Y,
    /// Axis index 2.
    Z,
}

impl LateralAxis {
    /// Component index of this axis.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis for a component index.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidAxis`] for indices other than 0, 1 and 2.
    pub fn from_index(index: usize) -> MeshResult<Self> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            other => Err(MeshError::InvalidAxis {
                axis: other.to_string(),
            }),
        }
    }

    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Self::X => Vector3::x(),
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    /// Project `v` onto the sagittal plane by zeroing its lateral component.
    ///
    /// The result is not renormalized.
    #[must_use]
    pub fn project_sagittal(self, v: &Vector3<f64>) -> Vector3<f64> {
        let mut projected = *v;
        projected[self.index()] = 0.0;
        projected
    }
}

impl fmt::Display for LateralAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for LateralAxis {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "0" => Ok(Self::X),
            "y" | "1" => Ok(Self::Y),
            "z" | "2" => Ok(Self::Z),
            _ => Err(MeshError::InvalidAxis {
                axis: s.to_string(),
            }),
        }
    }
}
