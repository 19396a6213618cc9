//! Exhaustive pairing of candidate seeds.
//!
//! Instead of relying on one pick per vertebra, every superior candidate is
//! paired with every inferior candidate. The result is the raw sequence of
//! angles; reducing it to one number is left to the caller.

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vertebra_curvature::CandidateSet;
use vertebra_types::SurfaceMesh;

use crate::angle::cobb_angle;
use crate::error::{CobbError, CobbResult};
use crate::orientation::{estimate_orientation, OrientationVector};
use crate::params::OrientationParams;
use crate::selection::Selection;

/// Angle measured for one pair of seeds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairAngle {
    /// Seed vertex on the superior mesh.
    pub superior_seed: u32,
    /// Seed vertex on the inferior mesh.
    pub inferior_seed: u32,
    /// Cobb angle in degrees.
    pub degrees: f64,
}

/// Outcome of [`scan_all`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanResult {
    /// Measured pairs, superior seed major, both in ascending id order.
    pub pairs: Vec<PairAngle>,
    /// Pairs dropped because one side lacked usable geometry.
    pub skipped: usize,
}

impl ScanResult {
    /// Angles in pair order.
    #[must_use]
    pub fn degrees(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.degrees).collect()
    }

    /// Number of measured pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair could be measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.pairs.len() + self.skipped
    }
}

type SeedOrientation = (u32, Option<OrientationVector>);

/// Estimate one orientation per seed in parallel.
///
/// Seeds without usable geometry map to `None`; any other error aborts.
fn orient_seeds<M: SurfaceMesh + Sync + ?Sized>(
    mesh: &M,
    candidates: &CandidateSet,
    params: &OrientationParams,
) -> CobbResult<Vec<SeedOrientation>> {
    candidates
        .sorted_ids()
        .into_par_iter()
        .map(|seed| {
            let selection = Selection::new(mesh, seed, candidates)?;
            match estimate_orientation(&selection, params) {
                Ok(v) => Ok((seed, Some(v))),
                Err(e) if e.is_insufficient_data() => {
                    debug!(seed, error = %e, "Seed has no usable endplate fit");
                    Ok((seed, None))
                }
                Err(e) => Err(e),
            }
        })
        .collect()
}

/// Measure the Cobb angle for every pair of superior and inferior candidates.
///
/// Each seed's orientation is estimated once and reused for all of its
/// pairs, which gives the same angles as estimating per pair. A pair is
/// skipped when either seed has too few or collinear fit points, or its
/// orientation is zero after projection. With `m` and `n` candidates the
/// result holds `m·n − skipped` pairs.
///
/// # Errors
///
/// - [`CobbError::InvalidParameter`] if `params` fail validation or a
///   candidate set does not match its mesh
/// - Errors other than insufficient data raised while fitting
pub fn scan_all<M: SurfaceMesh + Sync + ?Sized>(
    superior: &M,
    superior_candidates: &CandidateSet,
    inferior: &M,
    inferior_candidates: &CandidateSet,
    params: &OrientationParams,
) -> CobbResult<ScanResult> {
    params.validate()?;
    check_candidates("superior", superior, superior_candidates)?;
    check_candidates("inferior", inferior, inferior_candidates)?;

    let upper = orient_seeds(superior, superior_candidates, params)?;
    let lower = orient_seeds(inferior, inferior_candidates, params)?;

    let mut result = ScanResult {
        pairs: Vec::with_capacity(upper.len() * lower.len()),
        skipped: 0,
    };

    for &(superior_seed, up) in &upper {
        for &(inferior_seed, down) in &lower {
            let (Some(up), Some(down)) = (up, down) else {
                result.skipped += 1;
                continue;
            };
            match cobb_angle(&up, &down) {
                Ok(degrees) => result.pairs.push(PairAngle {
                    superior_seed,
                    inferior_seed,
                    degrees,
                }),
                Err(e) if e.is_insufficient_data() => result.skipped += 1,
                Err(e) => return Err(e),
            }
        }
    }

    info!(
        superior_candidates = upper.len(),
        inferior_candidates = lower.len(),
        pairs = result.pairs.len(),
        skipped = result.skipped,
        "Scanned all candidate pairs"
    );

    Ok(result)
}

fn check_candidates<M: SurfaceMesh + ?Sized>(
    side: &str,
    mesh: &M,
    candidates: &CandidateSet,
) -> CobbResult<()> {
    if candidates.vertex_count() == mesh.vertex_count() {
        Ok(())
    } else {
        Err(CobbError::invalid_parameter(format!(
            "{side} candidate set covers {} vertices but mesh has {}",
            candidates.vertex_count(),
            mesh.vertex_count()
        )))
    }
}
