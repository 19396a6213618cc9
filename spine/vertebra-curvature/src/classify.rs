//! Tolerance-sign surface classification.
//!
//! Each vertex is assigned one of nine surface classes from the signs of its
//! mean (H) and Gaussian (K) curvature. Signs are taken with a dead band
//! `[-ε, ε]` that maps to zero, so near-flat noise does not flip a vertex
//! between classes.
//!
//! The class code of a vertex is `1 + 3·(1 + sign(H)) + (1 − sign(K))`. The
//! table in [`SurfaceClass::from_signs`] spells out the nine cases instead of
//! evaluating that expression, so each entry can be read and tested on its
//! own.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurvatureError, CurvatureResult};
use crate::field::CurvatureField;

/// Sign of a curvature value after applying the dead band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvatureSign {
    /// Below `-ε`.
    Negative,
    /// Within `[-ε, ε]`.
    Zero,
    /// Above `ε`.
    Positive,
}

impl CurvatureSign {
    /// The sign as -1, 0 or 1.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }

    /// The opposite sign.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}

/// Sign of `x` with every value in `[-epsilon, epsilon]` mapped to zero.
///
/// # Example
///
/// ```
/// use vertebra_curvature::{tolerance_sign, CurvatureSign};
///
/// assert_eq!(tolerance_sign(0.5, 0.01), CurvatureSign::Positive);
/// assert_eq!(tolerance_sign(-0.01, 0.01), CurvatureSign::Zero);
/// assert_eq!(tolerance_sign(-0.02, 0.01), CurvatureSign::Negative);
/// ```
#[must_use]
pub fn tolerance_sign(x: f64, epsilon: f64) -> CurvatureSign {
    if x > epsilon {
        CurvatureSign::Positive
    } else if x < -epsilon {
        CurvatureSign::Negative
    } else {
        CurvatureSign::Zero
    }
}

/// Surface type of a vertex neighbourhood.
///
/// Codes 2 through 6 are the archetypes the endplate method names; the other
/// four codes are valid classes without an archetype and are named after
/// their sign pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SurfaceClass {
    /// H < 0, K > 0.
    NegativeElliptic = 1,
    /// H < 0, K = 0.
    Ridge = 2,
    /// H < 0, K < 0.
    SaddleRidge = 3,
    /// H = 0, K > 0. Geometrically unreachable; the archetype is called
    /// "none".
    NoShape = 4,
    /// H = 0, K = 0.
    #[default]
    Flat = 5,
    /// H = 0, K < 0.
    MinimalSurface = 6,
    /// H > 0, K > 0.
    PositiveElliptic = 7,
    /// H > 0, K = 0.
    PositiveParabolic = 8,
    /// H > 0, K < 0.
    PositiveHyperbolic = 9,
}

impl SurfaceClass {
    /// All classes in code order.
    pub const ALL: [Self; 9] = [
        Self::NegativeElliptic,
        Self::Ridge,
        Self::SaddleRidge,
        Self::NoShape,
        Self::Flat,
        Self::MinimalSurface,
        Self::PositiveElliptic,
        Self::PositiveParabolic,
        Self::PositiveHyperbolic,
    ];

    /// Class for a pair of mean and Gaussian curvature signs.
    #[must_use]
    pub const fn from_signs(mean: CurvatureSign, gaussian: CurvatureSign) -> Self {
        use CurvatureSign::{Negative, Positive, Zero};

        match (mean, gaussian) {
            (Negative, Positive) => Self::NegativeElliptic,
            (Negative, Zero) => Self::Ridge,
            (Negative, Negative) => Self::SaddleRidge,
            (Zero, Positive) => Self::NoShape,
            (Zero, Zero) => Self::Flat,
            (Zero, Negative) => Self::MinimalSurface,
            (Positive, Positive) => Self::PositiveElliptic,
            (Positive, Zero) => Self::PositiveParabolic,
            (Positive, Negative) => Self::PositiveHyperbolic,
        }
    }

    /// Numeric class code in `1..=9`.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Class for a numeric code, or `None` outside `1..=9`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::NegativeElliptic),
            2 => Some(Self::Ridge),
            3 => Some(Self::SaddleRidge),
            4 => Some(Self::NoShape),
            5 => Some(Self::Flat),
            6 => Some(Self::MinimalSurface),
            7 => Some(Self::PositiveElliptic),
            8 => Some(Self::PositiveParabolic),
            9 => Some(Self::PositiveHyperbolic),
            _ => None,
        }
    }

    /// Whether this class is one of the named archetypes (codes 2..=6).
    #[must_use]
    pub const fn is_named(self) -> bool {
        matches!(
            self,
            Self::Ridge | Self::SaddleRidge | Self::NoShape | Self::Flat | Self::MinimalSurface
        )
    }

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NegativeElliptic => "negative-elliptic",
            Self::Ridge => "ridge",
            Self::SaddleRidge => "saddle-ridge",
            Self::NoShape => "none",
            Self::Flat => "flat",
            Self::MinimalSurface => "minimal-surface",
            Self::PositiveElliptic => "positive-elliptic",
            Self::PositiveParabolic => "positive-parabolic",
            Self::PositiveHyperbolic => "positive-hyperbolic",
        }
    }
}

impl fmt::Display for SurfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

impl TryFrom<u8> for SurfaceClass {
    type Error = CurvatureError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(CurvatureError::InvalidSurfaceClass { code })
    }
}

/// Check that `epsilon` is usable as a dead band half-width.
///
/// # Errors
///
/// Returns [`CurvatureError::InvalidEpsilon`] for negative or non-finite
/// values.
pub fn validate_epsilon(epsilon: f64) -> CurvatureResult<()> {
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(())
    } else {
        Err(CurvatureError::InvalidEpsilon { value: epsilon })
    }
}

/// Classify one vertex from its mean curvature `h` and Gaussian curvature `k`.
///
/// # Errors
///
/// - [`CurvatureError::InvalidEpsilon`] if `epsilon` is negative or not finite
/// - [`CurvatureError::NonFiniteCurvature`] (vertex 0) if `h` or `k` is NaN
///   or infinite
///
/// # Example
///
/// ```
/// use vertebra_curvature::{classify, SurfaceClass};
///
/// assert_eq!(classify(0.001, -0.002, 0.01).unwrap(), SurfaceClass::Flat);
/// assert_eq!(classify(-0.5, 0.0, 0.01).unwrap(), SurfaceClass::Ridge);
/// assert!(classify(0.0, 0.0, -1.0).is_err());
/// ```
pub fn classify(h: f64, k: f64, epsilon: f64) -> CurvatureResult<SurfaceClass> {
    validate_epsilon(epsilon)?;
    if !h.is_finite() || !k.is_finite() {
        return Err(CurvatureError::NonFiniteCurvature { vertex: 0 });
    }
    Ok(classify_unchecked(h, k, epsilon))
}

#[inline]
fn classify_unchecked(h: f64, k: f64, epsilon: f64) -> SurfaceClass {
    SurfaceClass::from_signs(tolerance_sign(h, epsilon), tolerance_sign(k, epsilon))
}

/// Classify every vertex of a curvature field.
///
/// The result is indexed by vertex id.
///
/// # Errors
///
/// Returns [`CurvatureError::InvalidEpsilon`] if `epsilon` is negative or not
/// finite.
pub fn classify_field(field: &CurvatureField, epsilon: f64) -> CurvatureResult<Vec<SurfaceClass>> {
    validate_epsilon(epsilon)?;
    Ok(field
        .iter()
        .map(|(h, k)| classify_unchecked(h, k, epsilon))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use CurvatureSign::{Negative, Positive, Zero};

    #[test]
    fn table_matches_code_formula() {
        let signs = [Negative, Zero, Positive];
        for h in signs {
            for k in signs {
                let expected = 1 + 3 * (1 + h.value()) + (1 - k.value());
                let class = SurfaceClass::from_signs(h, k);
                assert_eq!(i16::from(class.code()), i16::from(expected), "{h:?}/{k:?}");
            }
        }
    }

    #[test]
    fn named_archetypes() {
        assert_eq!(SurfaceClass::from_code(2), Some(SurfaceClass::Ridge));
        assert_eq!(SurfaceClass::from_code(3), Some(SurfaceClass::SaddleRidge));
        assert_eq!(SurfaceClass::from_code(4), Some(SurfaceClass::NoShape));
        assert_eq!(SurfaceClass::from_code(5), Some(SurfaceClass::Flat));
        assert_eq!(SurfaceClass::from_code(6), Some(SurfaceClass::MinimalSurface));

        let named: Vec<u8> = SurfaceClass::ALL
            .iter()
            .filter(|c| c.is_named())
            .map(|c| c.code())
            .collect();
        assert_eq!(named, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn code_round_trip() {
        for class in SurfaceClass::ALL {
            assert_eq!(SurfaceClass::from_code(class.code()), Some(class));
            assert_eq!(SurfaceClass::try_from(class.code()).unwrap(), class);
        }
        assert!(SurfaceClass::from_code(0).is_none());
        assert!(matches!(
            SurfaceClass::try_from(10),
            Err(CurvatureError::InvalidSurfaceClass { code: 10 })
        ));
    }

    #[test]
    fn dead_band_is_inclusive() {
        assert_eq!(tolerance_sign(0.01, 0.01), Zero);
        assert_eq!(tolerance_sign(-0.01, 0.01), Zero);
        assert_eq!(tolerance_sign(0.010_001, 0.01), Positive);
        assert_eq!(tolerance_sign(0.0, 0.0), Zero);
        assert_eq!(tolerance_sign(1e-300, 0.0), Positive);
    }

    #[test]
    fn epsilon_domain() {
        assert!(classify(0.0, 0.0, 0.0).is_ok());
        for bad in [-1e-9, f64::NAN, f64::INFINITY] {
            let err = classify(0.0, 0.0, bad).unwrap_err();
            assert!(err.is_invalid_parameter());
        }
    }

    #[test]
    fn non_finite_curvature_is_rejected() {
        assert!(matches!(
            classify(f64::NAN, 0.0, 0.01),
            Err(CurvatureError::NonFiniteCurvature { .. })
        ));
    }

    #[test]
    fn huge_epsilon_collapses_to_flat() {
        for (h, k) in [(5.0, 3.0), (-40.0, 2.0), (0.3, -9.0)] {
            assert_eq!(classify(h, k, 1e9).unwrap(), SurfaceClass::Flat);
        }
    }

    #[test]
    fn field_classification_is_indexed_by_vertex() {
        let field =
            CurvatureField::from_parts(vec![0.0, -1.0, 1.0], vec![0.0, -1.0, 1.0]).unwrap();
        let classes = classify_field(&field, 0.01).unwrap();
        assert_eq!(
            classes,
            vec![
                SurfaceClass::Flat,
                SurfaceClass::SaddleRidge,
                SurfaceClass::PositiveElliptic
            ]
        );
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(SurfaceClass::Flat.to_string(), "flat (5)");
        assert_eq!(SurfaceClass::default(), SurfaceClass::Flat);
    }
}
