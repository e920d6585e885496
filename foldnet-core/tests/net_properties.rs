/// Property-based tests for the fold evaluator.
///
/// These tests use proptest to generate random box extents and progress
/// values and check the invariants every net must hold.
///
/// Run with: cargo test -p foldnet-core --test net_properties

use std::f32::consts::FRAC_PI_2;

use foldnet_core::{
    hinge_angle, BoxDimensions, Corner, FoldProgress, FoldableBox, FoldableCube, NetPattern,
    NetPose, FACE_COUNT,
};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_dimensions() -> impl Strategy<Value = BoxDimensions> {
    (0.5f32..6.0, 0.5f32..6.0, 0.5f32..6.0)
        .prop_map(|(l, w, h)| BoxDimensions::new(l, w, h).unwrap())
}

fn arb_pattern() -> impl Strategy<Value = NetPattern> {
    prop::sample::select(NetPattern::ALL.to_vec())
}

fn arb_progress() -> impl Strategy<Value = FoldProgress> {
    (0.0f32..=1.0).prop_map(FoldProgress::new)
}

const TOLERANCE: f32 = 1e-3;

fn mean_center(pose: &NetPose) -> Vector3<f32> {
    pose.faces
        .iter()
        .fold(Vector3::zeros(), |acc, f| acc + f.center().coords)
        / pose.faces.len() as f32
}

/// Extents of the corner bounding box, smallest first.
fn sorted_extents(pose: &NetPose) -> [f32; 3] {
    let mut min = Vector3::repeat(f32::INFINITY);
    let mut max = Vector3::repeat(f32::NEG_INFINITY);
    for face in &pose.faces {
        for corner in Corner::ALL {
            let p = face.corner(corner).coords;
            min = min.inf(&p);
            max = max.sup(&p);
        }
    }
    let mut extents = [max.x - min.x, max.y - min.y, max.z - min.z];
    extents.sort_by(f32::total_cmp);
    extents
}

fn sorted_dims(dims: &BoxDimensions) -> [f32; 3] {
    let mut sides = [dims.length(), dims.width(), dims.height()];
    sides.sort_by(f32::total_cmp);
    sides
}

/// Signed axis a closed face points along: 0..3 for +X/+Y/+Z, 3..6 for the
/// negative directions.
fn signed_axis(normal: &Vector3<f32>) -> usize {
    let axis = normal.iamax();
    if normal[axis] > 0.0 {
        axis
    } else {
        axis + 3
    }
}

fn assert_closed_box(pose: &NetPose, dims: &BoxDimensions) -> Result<(), TestCaseError> {
    let extents = sorted_extents(pose);
    for (got, want) in extents.iter().zip(sorted_dims(dims)) {
        prop_assert!((got - want).abs() < TOLERANCE, "extents {:?} for {:?}", extents, dims);
    }

    let mut planes: Vec<usize> = pose.faces.iter().map(|f| signed_axis(&f.normal())).collect();
    planes.sort_unstable();
    planes.dedup();
    prop_assert_eq!(planes.len(), FACE_COUNT, "two faces share a plane in {}", pose.pattern);
    Ok(())
}

// =============================================================================
// Topology
// =============================================================================

proptest! {
    #[test]
    fn every_pattern_is_a_six_face_tree(pattern in arb_pattern()) {
        let topology = pattern.topology();
        prop_assert_eq!(topology.pattern, pattern);
        prop_assert!(topology.validate().is_ok());
        prop_assert_eq!(topology.nodes.len(), FACE_COUNT);
        for face in 0..FACE_COUNT {
            prop_assert!(topology.depth(face).is_some());
        }
    }

    #[test]
    fn evaluation_visits_parents_first(
        pattern in arb_pattern(),
        dims in arb_dimensions(),
        progress in arb_progress(),
    ) {
        let pose = NetPose::evaluate(pattern, &dims, progress);
        let mut seen = Vec::new();
        for face in &pose.faces {
            if let Some(parent) = face.parent {
                prop_assert!(seen.contains(&parent));
            }
            seen.push(face.face);
        }
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..FACE_COUNT).collect::<Vec<_>>());
    }
}

// =============================================================================
// Fold angle
// =============================================================================

proptest! {
    #[test]
    fn angle_is_linear_in_progress(p in 0.0f32..=1.0) {
        let expected = (1.0 - p) * FRAC_PI_2;
        prop_assert!((hinge_angle(p) - expected).abs() < 1e-6);
    }

    #[test]
    fn angle_decreases_with_progress(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(hinge_angle(lo) >= hinge_angle(hi));
    }

    #[test]
    fn out_of_range_progress_is_clamped(
        pattern in arb_pattern(),
        below in -10.0f32..0.0,
        above in 1.0f32..10.0,
    ) {
        let dims = BoxDimensions::PRISM;
        prop_assert_eq!(
            NetPose::evaluate(pattern, &dims, FoldProgress::new(below)),
            NetPose::evaluate(pattern, &dims, FoldProgress::CLOSED)
        );
        prop_assert_eq!(
            NetPose::evaluate(pattern, &dims, FoldProgress::new(above)),
            NetPose::evaluate(pattern, &dims, FoldProgress::FLAT)
        );
    }
}

// =============================================================================
// Evaluator
// =============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        pattern in arb_pattern(),
        dims in arb_dimensions(),
        progress in arb_progress(),
    ) {
        let shape = FoldableBox::new(dims, pattern, progress);
        prop_assert_eq!(shape.build(), shape.build());
    }

    #[test]
    fn cube_adapter_matches_general_engine(
        pattern in arb_pattern(),
        size in 0.5f32..6.0,
        progress in arb_progress(),
    ) {
        let cube = FoldableCube::new(size, pattern, progress).unwrap();
        let general = FoldableBox::new(BoxDimensions::cube(size).unwrap(), pattern, progress);
        prop_assert_eq!(cube.build(), general.build());
    }

    #[test]
    fn flat_net_is_coplanar(pattern in arb_pattern(), dims in arb_dimensions()) {
        let pose = NetPose::evaluate(pattern, &dims, FoldProgress::FLAT);
        prop_assert_eq!(pose.angle, 0.0);
        for face in &pose.faces {
            prop_assert!((face.normal() - Vector3::y()).norm() < TOLERANCE);
            for corner in Corner::ALL {
                prop_assert!(face.corner(corner).y.abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn closed_net_is_a_box(pattern in arb_pattern(), dims in arb_dimensions()) {
        let pose = NetPose::evaluate(pattern, &dims, FoldProgress::CLOSED);
        prop_assert_eq!(pose.angle, FRAC_PI_2);
        let middle = mean_center(&pose);

        for face in &pose.faces {
            let normal = face.normal();
            let axis_aligned = normal.iter().filter(|c| c.abs() > TOLERANCE).count();
            prop_assert_eq!(axis_aligned, 1, "face {} normal {:?}", face.face, normal);

            // Each face sits straight out from the box centre along its normal.
            let out = face.center().coords - middle;
            prop_assert!(out.norm() > TOLERANCE);
            prop_assert!(out.cross(&normal).norm() < TOLERANCE);
        }

        // Faces other than the root stand perpendicular to or opposite the root.
        let root_normal = pose.faces[0].normal();
        for face in &pose.faces[1..] {
            let dot = face.normal().dot(&root_normal);
            prop_assert!(dot.abs() < TOLERANCE || (dot + 1.0).abs() < TOLERANCE);
        }

        assert_closed_box(&pose, &dims)?;
    }

    #[test]
    fn hinge_corners_stay_on_the_parent(
        pattern in arb_pattern(),
        dims in arb_dimensions(),
        progress in arb_progress(),
    ) {
        let pose = NetPose::evaluate(pattern, &dims, progress);
        for face in pose.faces.iter().filter(|f| f.parent.is_some()) {
            prop_assert_eq!(face.hinge_corners.len(), 2);
            let parent = face.parent.and_then(|p| pose.face(p)).unwrap();
            for corner in &face.hinge_corners {
                let p: Point3<f32> = face.corner(*corner);
                let on_parent = Corner::ALL
                    .iter()
                    .any(|pc| (parent.corner(*pc) - p).norm() < TOLERANCE);
                prop_assert!(on_parent, "face {} corner {:?}", face.face, corner);
            }
        }
    }
}

#[test]
fn every_net_closes_into_the_default_prism() {
    for pattern in NetPattern::ALL {
        let pose = NetPose::evaluate(pattern, &BoxDimensions::PRISM, FoldProgress::CLOSED);
        assert_closed_box(&pose, &BoxDimensions::PRISM)
            .unwrap_or_else(|err| panic!("{pattern}: {err}"));
    }
}
