//! Property-based tests for orientation and angle invariants.
//!
//! Run with: cargo test -p cobb-xing -- proptest

use cobb_xing::{
    cobb_angle, estimate_orientation, grow_region, GrowParams, OrientationParams,
    OrientationVector, Selection,
};
use proptest::prelude::*;
use vertebra_curvature::CandidateSet;
use vertebra_types::{Point3, SurfaceMesh, Vector3, VertebraMesh};

// =============================================================================
// Strategies
// =============================================================================

fn arb_direction() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-10.0..10.0f64)
        .prop_filter("non-zero", |v| Vector3::from(*v).norm() > 1e-3)
        .prop_map(Vector3::from)
}

fn arb_offset() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-500.0..500.0f64).prop_map(Vector3::from)
}

/// Height-field patch over a 5×5 grid with bounded random heights.
fn arb_patch() -> impl Strategy<Value = VertebraMesh> {
    prop::collection::vec(-0.3..0.3f64, 25).prop_map(|heights| {
        let mut positions = Vec::new();
        for j in 0..5u32 {
            for i in 0..5u32 {
                let h = heights[(j * 5 + i) as usize];
                positions.push(Point3::new(f64::from(i), f64::from(j), h));
            }
        }
        let mut faces = Vec::new();
        for j in 0..4u32 {
            for i in 0..4u32 {
                let a = j * 5 + i;
                faces.push([a, a + 1, a + 6]);
                faces.push([a, a + 6, a + 5]);
            }
        }
        VertebraMesh::new(positions, faces).unwrap()
    })
}

// =============================================================================
// Angle calculator
// =============================================================================

proptest! {
    /// The angle does not depend on argument order.
    #[test]
    fn angle_is_symmetric(a in arb_direction(), b in arb_direction()) {
        let va = OrientationVector::new(a);
        let vb = OrientationVector::new(b);
        prop_assert_eq!(cobb_angle(&va, &vb).unwrap(), cobb_angle(&vb, &va).unwrap());
    }

    /// A vector against itself measures 180 degrees.
    #[test]
    fn self_angle_is_180(a in arb_direction()) {
        let v = OrientationVector::new(a);
        prop_assert!((cobb_angle(&v, &v).unwrap() - 180.0).abs() < 1e-4);
    }

    /// A vector against its negation measures 0 degrees.
    #[test]
    fn opposite_angle_is_zero(a in arb_direction()) {
        let v = OrientationVector::new(a);
        let w = OrientationVector::new(-a);
        prop_assert!(cobb_angle(&v, &w).unwrap().abs() < 1e-4);
    }

    /// Results stay within [0, 180] and scaling either vector changes nothing.
    #[test]
    fn angle_is_bounded_and_scale_free(
        a in arb_direction(),
        b in arb_direction(),
        s in 0.01..100.0f64,
    ) {
        let d = cobb_angle(&OrientationVector::new(a), &OrientationVector::new(b)).unwrap();
        prop_assert!((0.0..=180.0).contains(&d));

        let scaled =
            cobb_angle(&OrientationVector::new(a * s), &OrientationVector::new(b)).unwrap();
        prop_assert!((d - scaled).abs() < 1e-6);
    }
}

// =============================================================================
// Region growing and orientation
// =============================================================================

proptest! {
    /// Growth always keeps the seed and is repeatable.
    #[test]
    fn region_contains_seed(mesh in arb_patch(), seed in 0u32..25, threshold in 0.05..2.5f64) {
        let params = GrowParams::new().with_normal_threshold(threshold);
        let first = grow_region(&mesh, seed, &params).unwrap();
        let second = grow_region(&mesh, seed, &params).unwrap();
        prop_assert!(first.contains(seed));
        prop_assert_eq!(first, second);
    }

    /// Translating the mesh leaves the estimated orientation unchanged.
    #[test]
    fn orientation_is_translation_invariant(
        mesh in arb_patch(),
        seed in 0u32..25,
        offset in arb_offset(),
    ) {
        let moved = mesh.translated(offset);
        let n = u32::try_from(mesh.vertex_count()).unwrap();
        let all = CandidateSet::from_ids(mesh.vertex_count(), 0..n).unwrap();
        let params = OrientationParams::new().with_normal_threshold(2.5);

        let a = estimate_orientation(&Selection::new(&mesh, seed, &all).unwrap(), &params);
        let b = estimate_orientation(&Selection::new(&moved, seed, &all).unwrap(), &params);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert!((a.as_vector() - b.as_vector()).norm() < 1e-6);
            }
            (Err(a), Err(b)) => {
                prop_assert_eq!(a.to_string(), b.to_string());
            }
            (a, b) => prop_assert!(false, "results differ: {:?} vs {:?}", a, b),
        }
    }
}
