//! Xing2017 Cobb angle measurement.
//!
//! Loads two vertebra meshes, classifies their surfaces by curvature and
//! measures the angle between the superior endplate of the upper vertebra
//! and the inferior endplate of the lower one.
//!
//! # Modes
//!
//! - `xing2017 L1.stl L2.stl --superior-point X Y Z --inferior-point X Y Z`
//!   measures one pair of picks, snapped to the nearest candidates
//! - `xing2017 L1.stl L2.stl --all` measures every pair of candidates and
//!   prints the raw angles
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use cobb_xing::{scan_all, CandidateSet, OrientationParams, PickOutcome, PickSession};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vertebra_curvature::{compute_curvature, find_candidates, CandidateParams};
use vertebra_types::{LateralAxis, Point3, VertebraMesh};

use crate::output::{format_angles, OutputFormat};

/// Cobb angle between two vertebrae
///
/// Endplates are found as flat regions of each mesh and fitted with a
/// least squares plane.
#[derive(Parser)]
#[command(name = "xing2017")]
#[command(about = "Measure the Cobb angle between two vertebra meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// STL mesh of the upper vertebra
    #[arg(name = "SUPERIOR")]
    superior: PathBuf,

    /// STL mesh of the lower vertebra
    #[arg(name = "INFERIOR")]
    inferior: PathBuf,

    /// Curvature magnitude below which a value counts as zero
    #[arg(short = 't', long, default_value_t = 0.01)]
    threshold: f64,

    /// Let open-boundary vertices of cropped scans become flat candidates
    #[arg(long)]
    include_boundary: bool,

    /// Measure every pair of flat candidates instead of one picked pair
    #[arg(long, conflicts_with_all = ["superior_point", "inferior_point"])]
    all: bool,

    /// Picked point on the superior mesh
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        required_unless_present = "all"
    )]
    superior_point: Option<Vec<f64>>,

    /// Picked point on the inferior mesh
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        required_unless_present = "all"
    )]
    inferior_point: Option<Vec<f64>>,

    /// Body axis treated as left-right and projected out (x, y or z)
    #[arg(long, default_value = "x")]
    lateral_axis: LateralAxis,

    /// Maximum normal difference for region growing
    #[arg(long, default_value_t = 0.5)]
    normal_threshold: f64,

    /// Output format for the angles
    #[arg(long, value_enum, default_value_t = OutputFormat::List)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let candidate_params = CandidateParams::new()
        .with_epsilon(cli.threshold)
        .with_include_unestimated(cli.include_boundary);
    let (superior, superior_candidates) = prepare(&cli.superior, &candidate_params)?;
    let (inferior, inferior_candidates) = prepare(&cli.inferior, &candidate_params)?;

    let params = OrientationParams::new()
        .with_normal_threshold(cli.normal_threshold)
        .with_lateral_axis(cli.lateral_axis);

    let angles = if cli.all {
        let scan = scan_all(
            &superior,
            &superior_candidates,
            &inferior,
            &inferior_candidates,
            &params,
        )?;
        info!(pairs = scan.len(), skipped = scan.skipped, "Exhaustive scan finished");
        scan.degrees()
    } else {
        let (Some(upper), Some(lower)) = (&cli.superior_point, &cli.inferior_point) else {
            bail!("--superior-point and --inferior-point are required without --all");
        };
        let mut session = PickSession::new(
            &superior,
            &superior_candidates,
            &inferior,
            &inferior_candidates,
            params,
        )?;
        session
            .pick(&to_point(upper)?)
            .context("snapping the superior pick")?;
        match session
            .pick(&to_point(lower)?)
            .context("measuring the picked pair")?
        {
            PickOutcome::Measured { degrees, .. } => vec![degrees],
            PickOutcome::Stored(_) => bail!("pick session did not produce an angle"),
        }
    };

    println!("{}", format_angles(&angles, cli.format)?);
    Ok(())
}

/// Load a mesh and select its flat candidates.
fn prepare(path: &Path, params: &CandidateParams) -> Result<(VertebraMesh, CandidateSet)> {
    let mesh = vertebra_io::load_stl(path).with_context(|| format!("loading {}", path.display()))?;
    let field = compute_curvature(&mesh);
    let candidates = find_candidates(&field, params)?;
    info!(
        path = %path.display(),
        candidates = candidates.len(),
        "Selected endplate candidates"
    );
    Ok((mesh, candidates))
}

fn to_point(coords: &[f64]) -> Result<Point3<f64>> {
    match coords {
        &[x, y, z] => Ok(Point3::new(x, y, z)),
        _ => bail!("a point needs exactly three coordinates, got {}", coords.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn single_pair_arguments() {
        let cli = Cli::try_parse_from([
            "xing2017",
            "L1.stl",
            "L2.stl",
            "--superior-point",
            "1",
            "-2.5",
            "3",
            "--inferior-point",
            "0",
            "0",
            "-4",
            "--lateral-axis",
            "y",
        ])
        .unwrap();
        assert!(!cli.all);
        assert_eq!(cli.superior_point, Some(vec![1.0, -2.5, 3.0]));
        assert_eq!(cli.inferior_point, Some(vec![0.0, 0.0, -4.0]));
        assert_eq!(cli.lateral_axis, LateralAxis::Y);
        assert!((cli.threshold - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn points_required_without_all() {
        assert!(Cli::try_parse_from(["xing2017", "L1.stl", "L2.stl"]).is_err());
        let cli = Cli::try_parse_from(["xing2017", "L1.stl", "L2.stl", "--all", "-t", "0.05"])
            .unwrap();
        assert!(cli.all);
        assert!((cli.threshold - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn all_conflicts_with_points() {
        assert!(Cli::try_parse_from([
            "xing2017",
            "L1.stl",
            "L2.stl",
            "--all",
            "--superior-point",
            "0",
            "0",
            "0",
        ])
        .is_err());
    }

    #[test]
    fn point_conversion() {
        assert_eq!(to_point(&[1.0, 2.0, 3.0]).unwrap(), Point3::new(1.0, 2.0, 3.0));
        assert!(to_point(&[1.0, 2.0]).is_err());
    }
}
