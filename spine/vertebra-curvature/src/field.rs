//! Per-vertex mean and Gaussian curvature.
//!
//! [`compute_curvature`] implements the discrete operators of Meyer, Desbrun,
//! Schröder and Barr ("Discrete Differential-Geometry Operators for
//! Triangulated 2-Manifolds", 2003):
//!
//! - Gaussian curvature from the angle defect, `K = (2π − Σθ) / A`
//! - Mean curvature from the cotangent Laplacian, `H n = −Δx / (4A)`
//!
//! where `A` is the mixed Voronoi area of the vertex. The operators are
//! undefined on an open boundary; such vertices are stored as zero and
//! marked unestimated so candidate selection can leave them out. Callers
//! with curvature from another source can wrap it with
//! [`CurvatureField::from_parts`].

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};
use vertebra_types::SurfaceMesh;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurvatureError, CurvatureResult};

/// Faces with twice-area below this are skipped.
const AREA_EPSILON: f64 = 1e-14;

/// Mean (H) and Gaussian (K) curvature for every vertex of one mesh.
///
/// Both arrays are indexed by vertex id and hold only finite values.
/// Vertices the discrete operators cannot handle carry `H = K = 0` and are
/// flagged unestimated (see [`CurvatureField::is_estimated`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvatureField {
    mean: Vec<f64>,
    gaussian: Vec<f64>,
    estimated: Vec<bool>,
}

impl CurvatureField {
    /// Wrap externally computed curvature arrays. Every vertex counts as
    /// estimated.
    ///
    /// # Errors
    ///
    /// - [`CurvatureError::LengthMismatch`] if the arrays differ in length
    /// - [`CurvatureError::NonFiniteCurvature`] if any value is NaN or infinite
    ///
    /// # Example
    ///
    /// ```
    /// use vertebra_curvature::CurvatureField;
    ///
    /// let field = CurvatureField::from_parts(vec![0.0, 0.2], vec![0.0, 0.01]).unwrap();
    /// assert_eq!(field.len(), 2);
    /// assert_eq!(field.mean(1), Some(0.2));
    ///
    /// assert!(CurvatureField::from_parts(vec![0.0], vec![]).is_err());
    /// ```
    pub fn from_parts(mean: Vec<f64>, gaussian: Vec<f64>) -> CurvatureResult<Self> {
        if mean.len() != gaussian.len() {
            return Err(CurvatureError::LengthMismatch {
                mean: mean.len(),
                gaussian: gaussian.len(),
            });
        }

        if let Some(vertex) = mean
            .iter()
            .zip(&gaussian)
            .position(|(h, k)| !h.is_finite() || !k.is_finite())
        {
            return Err(CurvatureError::NonFiniteCurvature { vertex });
        }

        let estimated = vec![true; mean.len()];
        Ok(Self {
            mean,
            gaussian,
            estimated,
        })
    }

    /// Mean curvature of vertex `id`.
    #[must_use]
    pub fn mean(&self, id: u32) -> Option<f64> {
        self.mean.get(id as usize).copied()
    }

    /// Gaussian curvature of vertex `id`.
    #[must_use]
    pub fn gaussian(&self, id: u32) -> Option<f64> {
        self.gaussian.get(id as usize).copied()
    }

    /// Whether vertex `id` received a real estimate.
    ///
    /// `false` for open-boundary vertices, vertices without incident area,
    /// vertices whose estimate was not finite, and out-of-range ids.
    #[must_use]
    pub fn is_estimated(&self, id: u32) -> bool {
        self.estimated.get(id as usize).copied().unwrap_or(false)
    }

    /// Number of vertices without a real estimate.
    #[must_use]
    pub fn unestimated_count(&self) -> usize {
        self.estimated.iter().filter(|&&e| !e).count()
    }

    /// All mean curvature values.
    #[must_use]
    pub fn mean_values(&self) -> &[f64] {
        &self.mean
    }

    /// All Gaussian curvature values.
    #[must_use]
    pub fn gaussian_values(&self) -> &[f64] {
        &self.gaussian
    }

    /// Number of vertices covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether the field covers no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `(H, K)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mean.iter().copied().zip(self.gaussian.iter().copied())
    }
}

/// Per-vertex sums gathered in one pass over the faces.
#[derive(Clone, Copy)]
struct Accumulator {
    angle_sum: f64,
    mixed_area: f64,
    laplacian: Vector3<f64>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            angle_sum: 0.0,
            mixed_area: 0.0,
            laplacian: Vector3::zeros(),
        }
    }
}

/// Interior angle and its cotangent at corner `at` of a triangle.
fn corner(at: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> (f64, f64) {
    let u = a - at;
    let v = b - at;
    let cross = u.cross(&v).norm();
    let dot = u.dot(&v);
    (cross.atan2(dot), dot / cross)
}

/// Compute discrete mean and Gaussian curvature for every vertex.
///
/// Vertices on an open boundary, vertices without incident area, and
/// vertices whose estimate is not finite report `H = K = 0` and are marked
/// unestimated. Faces referring to unknown vertices are skipped. Mean curvature
/// is signed against the mesh vertex normal, so a convex surface with
/// outward-facing normals has positive `H`.
///
/// # Example
///
/// ```
/// use vertebra_curvature::compute_curvature;
/// use vertebra_types::VertebraMesh;
///
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2, 0, 2, 3],
/// )
/// .unwrap();
///
/// let field = compute_curvature(&mesh);
/// assert_eq!(field.len(), 4);
/// assert!(field.iter().all(|(h, k)| h == 0.0 && k == 0.0));
/// // every corner of a lone square is on its boundary
/// assert_eq!(field.unestimated_count(), 4);
/// ```
#[must_use]
pub fn compute_curvature<M: SurfaceMesh + Sync + ?Sized>(mesh: &M) -> CurvatureField {
    let positions: Vec<Point3<f64>> = (0..mesh.vertex_count())
        .map_while(|v| u32::try_from(v).ok().and_then(|id| mesh.position(id)))
        .collect();
    let mut acc = vec![Accumulator::default(); positions.len()];
    let mut skipped_faces = 0usize;

    for &[i0, i1, i2] in mesh.faces() {
        let ids = [i0 as usize, i1 as usize, i2 as usize];
        let (Some(&p0), Some(&p1), Some(&p2)) = (
            positions.get(ids[0]),
            positions.get(ids[1]),
            positions.get(ids[2]),
        ) else {
            skipped_faces += 1;
            continue;
        };
        let p = [p0, p1, p2];

        let double_area = (p[1] - p[0]).cross(&(p[2] - p[0])).norm();
        if double_area.is_nan() || double_area <= AREA_EPSILON {
            skipped_faces += 1;
            continue;
        }
        let area = 0.5 * double_area;

        let mut angle = [0.0; 3];
        let mut cot = [0.0; 3];
        for c in 0..3 {
            let (theta, cotangent) = corner(&p[c], &p[(c + 1) % 3], &p[(c + 2) % 3]);
            angle[c] = theta;
            cot[c] = cotangent;
        }
        let obtuse = angle.iter().position(|&theta| theta > PI / 2.0);

        for c in 0..3 {
            let j = (c + 1) % 3;
            let k = (c + 2) % 3;
            let to_j = p[j] - p[c];
            let to_k = p[k] - p[c];

            let slot = &mut acc[ids[c]];
            slot.angle_sum += angle[c];
            // edge c-j is opposite corner k, edge c-k is opposite corner j
            slot.laplacian += to_j * cot[k] + to_k * cot[j];
            slot.mixed_area += match obtuse {
                None => (to_k.norm_squared() * cot[j] + to_j.norm_squared() * cot[k]) / 8.0,
                Some(o) if o == c => area / 2.0,
                Some(_) => area / 4.0,
            };
        }
    }

    let estimates: Vec<Option<(f64, f64)>> = acc
        .par_iter()
        .enumerate()
        .map(|(v, a)| {
            let id = u32::try_from(v).ok()?;
            let no_area = a.mixed_area.is_nan() || a.mixed_area <= AREA_EPSILON;
            if no_area || mesh.is_boundary_vertex(id) {
                return None;
            }
            let normal = mesh.vertex_normal(id).unwrap_or_else(Vector3::zeros);
            let h = -a.laplacian.dot(&normal) / (4.0 * a.mixed_area);
            let k = (TAU - a.angle_sum) / a.mixed_area;
            (h.is_finite() && k.is_finite()).then_some((h, k))
        })
        .collect();

    let estimated: Vec<bool> = estimates.iter().map(Option::is_some).collect();
    let (mean, gaussian): (Vec<f64>, Vec<f64>) = estimates
        .into_iter()
        .map(|e| e.unwrap_or((0.0, 0.0)))
        .unzip();

    if skipped_faces > 0 {
        warn!(skipped_faces, "Skipped degenerate faces in curvature estimate");
    }
    let field = CurvatureField {
        mean,
        gaussian,
        estimated,
    };
    debug!(
        vertices = field.len(),
        faces = mesh.faces().len(),
        unestimated = field.unestimated_count(),
        "Computed discrete curvature"
    );

    field
}
