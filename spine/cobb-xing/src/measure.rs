//! Single-pair measurement.

use tracing::info;
use vertebra_types::SurfaceMesh;

use crate::angle::cobb_angle;
use crate::error::CobbResult;
use crate::orientation::estimate_orientation;
use crate::params::OrientationParams;
use crate::selection::Selection;

/// Cobb angle between the endplates picked on two vertebrae.
///
/// Fits a plane to each selection with [`estimate_orientation`] and compares
/// the two orientations with [`cobb_angle`]. Both selections use the same
/// parameters, so both meshes must share a frame for the lateral axis.
///
/// # Errors
///
/// Any error from [`estimate_orientation`] or [`cobb_angle`]; none are
/// recovered here.
pub fn xing2017<M: SurfaceMesh + ?Sized>(
    superior: &Selection<'_, M>,
    inferior: &Selection<'_, M>,
    params: &OrientationParams,
) -> CobbResult<f64> {
    let upper = estimate_orientation(superior, params)?;
    let lower = estimate_orientation(inferior, params)?;
    let degrees = cobb_angle(&upper, &lower)?;

    info!(
        superior_seed = superior.seed(),
        inferior_seed = inferior.seed(),
        degrees,
        "Measured Cobb angle"
    );

    Ok(degrees)
}
