//! Endplate plane fitting.
//!
//! The plane is fitted to the vertices that are both in the normal region
//! grown from the seed and in the candidate set. The fit is a total least
//! squares fit: after centering, the right singular vector of the point
//! matrix with the smallest singular value is the plane normal. It is read
//! off the eigendecomposition of the 3 x 3 scatter matrix, whose eigenvalues
//! are the squared singular values.

use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use tracing::debug;
use vertebra_types::SurfaceMesh;

use crate::error::{CobbError, CobbResult};
use crate::params::OrientationParams;
use crate::region::grow_region;
use crate::selection::Selection;

/// Fewest points that can define a plane.
pub const MIN_FIT_POINTS: usize = 3;

/// Iteration cap for the scatter matrix eigendecomposition.
const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Sagittal-plane direction of a fitted endplate.
///
/// Only the direction is meaningful; the vector is not normalized and may be
/// zero when the fitted normal lies along the lateral axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationVector(Vector3<f64>);

impl OrientationVector {
    /// Wrap a direction.
    #[must_use]
    pub const fn new(v: Vector3<f64>) -> Self {
        Self(v)
    }

    /// The underlying vector.
    #[must_use]
    pub const fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }
}

impl From<Vector3<f64>> for OrientationVector {
    fn from(v: Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<OrientationVector> for Vector3<f64> {
    fn from(v: OrientationVector) -> Self {
        v.0
    }
}

/// Full outcome of fitting one endplate.
#[derive(Debug, Clone, PartialEq)]
pub struct EndplateFit {
    /// Normal projected onto the sagittal plane.
    pub orientation: OrientationVector,
    /// Unit plane normal before projection.
    pub normal: Vector3<f64>,
    /// Centroid of the fitted points.
    pub centroid: Point3<f64>,
    /// Singular values of the centered point matrix, largest first.
    pub singular_values: [f64; 3],
    /// Number of vertices in the grown region.
    pub region_size: usize,
    /// Vertex ids the plane was fitted to, ascending.
    pub fit_vertices: Vec<u32>,
}

/// Fit a plane to one selection and report the details.
///
/// The fitted normal is oriented to agree with the summed vertex normals of
/// the fit points, so it points out of the bone.
///
/// # Errors
///
/// - [`CobbError::InvalidParameter`] if `params` fail validation
/// - [`CobbError::InsufficientPoints`] if fewer than three points remain
///   after intersecting the region with the candidates
/// - [`CobbError::DegenerateGeometry`] if the remaining points are collinear
///   or coincident
pub fn fit_endplate<M: SurfaceMesh + ?Sized>(
    selection: &Selection<'_, M>,
    params: &OrientationParams,
) -> CobbResult<EndplateFit> {
    params.validate()?;

    let mesh = selection.mesh();
    let region = grow_region(mesh, selection.seed(), &params.grow)?;

    let mut fit_vertices: Vec<u32> = region
        .iter()
        .filter(|&id| selection.candidates().contains(id))
        .collect();
    fit_vertices.sort_unstable();

    let points: Vec<Point3<f64>> = fit_vertices
        .iter()
        .filter_map(|&id| mesh.position(id))
        .collect();

    if points.len() < MIN_FIT_POINTS {
        return Err(CobbError::InsufficientPoints {
            required: MIN_FIT_POINTS,
            actual: points.len(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let centroid = Point3::from(
        points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / points.len() as f64,
    );

    let mut scatter = Matrix3::zeros();
    for p in &points {
        let d = p - centroid;
        scatter += d * d.transpose();
    }

    let eigen = SymmetricEigen::try_new(scatter, f64::EPSILON, MAX_EIGEN_ITERATIONS)
        .ok_or(CobbError::FitFailed)?;

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
    let singular_values = order.map(|i| eigen.eigenvalues[i].max(0.0).sqrt());

    let [largest, middle, _] = singular_values;
    if middle.is_nan() || middle <= params.collinearity_tolerance * largest {
        return Err(CobbError::DegenerateGeometry {
            points: points.len(),
        });
    }

    let mut normal = eigen.eigenvectors.column(order[2]).into_owned().normalize();

    let outward = fit_vertices
        .iter()
        .filter_map(|&id| mesh.vertex_normal(id))
        .fold(Vector3::zeros(), |acc, n| acc + n);
    if normal.dot(&outward) < 0.0 {
        normal = -normal;
    }

    let orientation = OrientationVector(params.lateral_axis.project_sagittal(&normal));

    debug!(
        seed = selection.seed(),
        region = region.len(),
        fit_points = points.len(),
        normal = ?normal,
        "Fitted endplate plane"
    );

    Ok(EndplateFit {
        orientation,
        normal,
        centroid,
        singular_values,
        region_size: region.len(),
        fit_vertices,
    })
}

/// Estimate the sagittal orientation of the endplate picked by `selection`.
///
/// See [`fit_endplate`] for the procedure and errors.
///
/// # Errors
///
/// Same as [`fit_endplate`].
///
/// # Example
///
/// ```
/// use cobb_xing::{estimate_orientation, OrientationParams, Selection};
/// use vertebra_curvature::CandidateSet;
/// use vertebra_types::VertebraMesh;
///
/// // Unit square tilted about the x axis
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0],
///     &[0, 1, 2, 0, 2, 3],
/// )
/// .unwrap();
/// let all = CandidateSet::from_ids(4, 0..4).unwrap();
/// let selection = Selection::new(&mesh, 0, &all).unwrap();
///
/// let v = estimate_orientation(&selection, &OrientationParams::default()).unwrap();
/// let v = v.as_vector().normalize();
/// assert!(v.x.abs() < 1e-12);
/// assert!((v.y + v.z).abs() < 1e-9);
/// ```
pub fn estimate_orientation<M: SurfaceMesh + ?Sized>(
    selection: &Selection<'_, M>,
    params: &OrientationParams,
) -> CobbResult<OrientationVector> {
    fit_endplate(selection, params).map(|fit| fit.orientation)
}
