//! Property-based tests for curvature classification.
//!
//! Run with: cargo test -p vertebra-curvature -- proptest

use proptest::prelude::*;
use vertebra_curvature::{
    classify, compute_curvature, find_candidates, tolerance_sign, CandidateParams,
    CurvatureField, SurfaceClass,
};
use vertebra_types::{Point3, VertebraMesh};

// =============================================================================
// Strategies
// =============================================================================

fn arb_curvature() -> impl Strategy<Value = f64> {
    -50.0..50.0f64
}

fn arb_epsilon() -> impl Strategy<Value = f64> {
    0.0..1.0f64
}

/// Random triangle soup over a bounded vertex set. Faces may be degenerate.
fn arb_mesh() -> impl Strategy<Value = VertebraMesh> {
    (3usize..24).prop_flat_map(|n| {
        let positions = prop::collection::vec(prop::array::uniform3(-10.0..10.0f64), n);
        let bound = u32::try_from(n).unwrap();
        let faces = prop::collection::vec(prop::array::uniform3(0..bound), 1..40);
        (positions, faces).prop_map(|(positions, faces)| {
            let points = positions
                .into_iter()
                .map(|[x, y, z]| Point3::new(x, y, z))
                .collect();
            VertebraMesh::new(points, faces).unwrap()
        })
    })
}

// =============================================================================
// Sign and classification
// =============================================================================

proptest! {
    /// The tolerance sign is odd-symmetric.
    #[test]
    fn sign_is_odd(x in arb_curvature(), eps in arb_epsilon()) {
        prop_assert_eq!(tolerance_sign(x, eps), tolerance_sign(-x, eps).negate());
    }

    /// Every value inside the dead band has sign zero.
    #[test]
    fn dead_band_maps_to_zero(t in -1.0..=1.0f64, eps in arb_epsilon()) {
        prop_assert_eq!(tolerance_sign(t * eps, eps).value(), 0);
    }

    /// Classification is deterministic and always yields a code in 1..=9.
    #[test]
    fn classify_is_pure(h in arb_curvature(), k in arb_curvature(), eps in arb_epsilon()) {
        let first = classify(h, k, eps).unwrap();
        let second = classify(h, k, eps).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!((1..=9).contains(&first.code()));
    }

    /// A band wider than any curvature collapses everything to flat.
    #[test]
    fn wide_band_is_flat(h in arb_curvature(), k in arb_curvature()) {
        prop_assert_eq!(classify(h, k, 1e3).unwrap(), SurfaceClass::Flat);
    }

    /// Candidate ids always refer to existing vertices.
    #[test]
    fn candidates_are_in_range(
        values in prop::collection::vec((arb_curvature(), arb_curvature()), 0..64),
        eps in arb_epsilon(),
    ) {
        let (mean, gaussian): (Vec<f64>, Vec<f64>) = values.into_iter().unzip();
        let field = CurvatureField::from_parts(mean, gaussian).unwrap();
        let set = find_candidates(&field, &CandidateParams::new().with_epsilon(eps)).unwrap();
        prop_assert!(set.iter().all(|id| (id as usize) < field.len()));
    }
}

// =============================================================================
// Discrete curvature
// =============================================================================

proptest! {
    /// Curvature is finite for every vertex, even on degenerate soups.
    #[test]
    fn curvature_is_always_finite(mesh in arb_mesh()) {
        let field = compute_curvature(&mesh);
        prop_assert_eq!(field.len(), mesh.positions().len());
        prop_assert!(field.iter().all(|(h, k)| h.is_finite() && k.is_finite()));
    }
}
