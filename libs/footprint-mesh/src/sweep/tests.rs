//! Tests for the path sweep.

use super::*;
use crate::error::ErrorKind;
use crate::sink::{Material, MeshBuffer, ShapeRecord};
use approx::assert_relative_eq;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

fn profile() -> Polygon {
    let mut p = Polygon::rectangle(0.0);
    p.calc(0.4, 0.4, &Transform::identity()).expect("valid profile");
    p
}

fn wire(points: &[[f64; 3]]) -> Wire {
    let mut w = Wire::new();
    for p in points {
        w.add_point(DVec3::from(*p)).expect("finite");
    }
    w
}

fn sweep(w: &Wire, cap0: bool, cap1: bool, out: &mut MeshBuffer) -> GeomResult<SweepSummary> {
    w.build(&profile(), cap0, cap1, true, &Transform::identity(), &Material::new("lead"), false, out)
}

/// Centroid of the far ring of a stitched section.
fn far_ring_center(shape: &ShapeRecord) -> DVec3 {
    let n = shape.vertices.len() / 2;
    shape.vertices[n..].iter().copied().sum::<DVec3>() / n as f64
}

// =============================================================================
// PARAMETERS
// =============================================================================

#[test]
fn test_default_parameters() {
    let w = Wire::new();
    assert_eq!(w.config().segments_per_90, 5);
    assert_relative_eq!(w.config().bend_radius, 1.0);
    assert!(w.points().is_empty());
}

#[test]
fn test_set_params_validates() {
    let mut w = Wire::new();
    assert_eq!(w.set_params(1, 1.0).unwrap_err().kind(), ErrorKind::InvalidParameter);
    assert_eq!(w.set_params(8, 0.0).unwrap_err().kind(), ErrorKind::InvalidParameter);
    // A rejected update keeps the previous values.
    assert_eq!(w.config().segments_per_90, 5);
    w.set_params(8, 0.5).expect("valid");
    assert_eq!(w.config().segments_per_90, 8);
}

#[test]
fn test_add_point_and_clear() {
    let mut w = wire(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    assert_eq!(w.points().len(), 2);
    assert!(w.add_point(DVec3::new(f64::NAN, 0.0, 0.0)).is_err());
    w.set_params(10, 2.0).expect("valid");
    w.clear();
    assert!(w.points().is_empty());
    assert_eq!(w.config().segments_per_90, 10);
}

// =============================================================================
// STRAIGHT RUNS
// =============================================================================

#[test]
fn test_two_point_wire_is_one_section() {
    let w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, true, true, &mut out).expect("sweeps");

    assert_relative_eq!(summary.length, 10.0);
    assert_eq!(summary.stations, vec![10.0]);
    // Walls, start cap, end cap.
    assert_eq!(out.shapes().len(), 3);
    let walls = &out.shapes()[0];
    assert!(walls.vertices[..4].iter().all(|v| v.x.abs() < 1e-12));
    assert!(walls.vertices[4..].iter().all(|v| (v.x - 10.0).abs() < 1e-12));
    // Four 0.4 x 10 walls plus two 0.4 x 0.4 caps.
    assert_relative_eq!(out.area(), 16.0 + 0.32, epsilon = 1e-9);
}

#[test]
fn test_collinear_waypoints_stay_straight() {
    let w = wire(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");
    assert_relative_eq!(summary.length, 10.0);
    assert_eq!(summary.stations.len(), 2);
    assert_relative_eq!(summary.stations[0], 5.0);
}

#[test]
fn test_profile_faces_negative_z() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, -5.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");
    assert_relative_eq!(summary.length, 5.0);
    let walls = &out.shapes()[0];
    assert!(walls.vertices[..4].iter().all(|v| v.z.abs() < 1e-12));
    assert!(walls.vertices[4..].iter().all(|v| (v.z + 5.0).abs() < 1e-12));
}

#[test]
fn test_only_first_section_is_fresh() {
    let w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]]);
    let mut out = MeshBuffer::new();
    sweep(&w, false, false, &mut out).expect("sweeps");
    assert!(!out.shapes()[0].reuse);
    assert!(out.shapes()[1..].iter().all(|s| s.reuse));
}

// =============================================================================
// BENDS
// =============================================================================

#[test]
fn test_right_angle_bend() {
    let w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");

    // 9 straight, a quarter arc of radius 1, 9 straight.
    assert_relative_eq!(summary.length, 18.0 + FRAC_PI_2, epsilon = 1e-9);
    assert!(summary.length < 20.0);
    // 1 straight + 5 arc facets + 1 straight.
    assert_eq!(summary.stations.len(), 7);
    assert!(summary.stations.windows(2).all(|s| s[1] > s[0]));
    assert_relative_eq!(summary.stations[0], 9.0, epsilon = 1e-12);
}

#[test]
fn test_bend_lands_on_the_next_segment() {
    let w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]]);
    let mut out = MeshBuffer::new();
    sweep(&w, false, false, &mut out).expect("sweeps");

    // After the arc the ring is centered on the tangent point (10, 1).
    let arc_end = far_ring_center(&out.shapes()[5]);
    assert_relative_eq!(arc_end.x, 10.0, epsilon = 1e-9);
    assert_relative_eq!(arc_end.y, 1.0, epsilon = 1e-9);

    let last = &out.shapes()[6];
    let end = far_ring_center(last);
    assert_relative_eq!(end.x, 10.0, epsilon = 1e-9);
    assert_relative_eq!(end.y, 10.0, epsilon = 1e-9);
    // The end ring lies across the outgoing direction.
    assert!(last.vertices[4..].iter().all(|v| (v.y - 10.0).abs() < 1e-9));
}

#[test]
fn test_facet_count_follows_density() {
    let mut w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]]);
    w.set_params(2, 1.0).expect("valid");
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");
    assert_eq!(summary.stations.len(), 4);

    // A shallow turn still gets the minimum of two facets.
    let shallow = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [20.0, 1.0, 0.0]]);
    out.clear();
    let summary = sweep(&shallow, false, false, &mut out).expect("sweeps");
    assert_eq!(summary.stations.len(), 4);
}

#[test]
fn test_half_right_angle_bend_arc_length() {
    let w = wire(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [20.0, 10.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");

    let tangent = FRAC_PI_8.tan();
    let second = 200.0_f64.sqrt();
    assert_relative_eq!(summary.length, (10.0 - tangent) + FRAC_PI_4 + (second - tangent), epsilon = 1e-9);
    assert!(summary.length < 10.0 + second);
    // 2.5 facets at five per quarter turn floors to two.
    assert_eq!(summary.stations.len(), 4);
    assert_relative_eq!(summary.stations[0], 10.0 - tangent, epsilon = 1e-12);
    assert_relative_eq!(summary.stations[2], 10.0 - tangent + FRAC_PI_4, epsilon = 1e-9);
}

#[test]
fn test_bend_at_segment_start_carries_the_cap() {
    // The first segment is exactly one tangent long.
    let w = wire(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 5.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, true, false, &mut out).expect("sweeps");
    assert_relative_eq!(summary.length, FRAC_PI_2 + 4.0, epsilon = 1e-9);
    // First arc facet walls, then the start cap.
    assert_eq!(out.shapes()[1].facets, vec![vec![3, 2, 1, 0]]);
}

#[test]
fn test_end_cap_after_trailing_bend() {
    // The last segment is consumed entirely by the bend.
    let w = wire(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [5.0, 1.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let summary = sweep(&w, false, true, &mut out).expect("sweeps");
    assert_eq!(summary.stations.len(), 6);
    // Five arc facets followed by the end cap.
    assert_eq!(out.shapes().len(), 7);
    assert_eq!(out.shapes()[6].facets.len(), 1);
}

#[test]
fn test_segment_too_short_for_bend() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.5, 0.0, 0.0], [0.5, 10.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let err = sweep(&w, false, false, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryDegenerate);
}

#[test]
fn test_consecutive_bends_share_a_segment() {
    // Two right-angle bends 1.5 apart need 2.0 of straight path.
    let w = wire(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [5.0, 1.5, 0.0], [10.0, 1.5, 0.0]]);
    let mut out = MeshBuffer::new();
    let err = sweep(&w, false, false, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryDegenerate);

    let w = wire(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [5.0, 3.0, 0.0], [10.0, 3.0, 0.0]]);
    out.clear();
    let summary = sweep(&w, false, false, &mut out).expect("sweeps");
    assert_relative_eq!(summary.length, 4.0 + 1.0 + 4.0 + 2.0 * FRAC_PI_2, epsilon = 1e-9);
}

#[test]
fn test_reversing_path_is_degenerate() {
    let w = wire(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let err = sweep(&w, false, false, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryDegenerate);
}

// =============================================================================
// INVALID INPUT
// =============================================================================

#[test]
fn test_path_needs_two_points() {
    let mut out = MeshBuffer::new();
    let err = sweep(&wire(&[[1.0, 2.0, 3.0]]), false, false, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert!(out.is_empty());
}

#[test]
fn test_zero_length_segment_is_rejected() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let err = sweep(&w, false, false, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_profile_needs_calc() {
    let w = wire(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let mut out = MeshBuffer::new();
    let err = w
        .build(&Polygon::circle(), false, false, true, &Transform::identity(), &Material::new("x"), false, &mut out)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryDegenerate);
}
