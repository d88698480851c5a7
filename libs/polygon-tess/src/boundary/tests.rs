//! Tests for boundary extraction.

use super::*;
use crate::signed_area2;
use crate::test_support::Recorder;

fn contour(points: &[[f64; 2]], first_id: usize) -> Vec<Vertex> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            pos: DVec2::from(*p),
            id: first_id + i,
        })
        .collect()
}

const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];

#[test]
fn test_ccw_square_is_its_own_boundary() {
    let mut rec = Recorder::starting_at(4);
    let boundary = resolve(&[contour(&SQUARE, 0)], &mut rec).expect("resolves");
    assert_eq!(boundary.loops.len(), 1);
    assert_eq!(boundary.loops[0].len(), 4);
    assert!(signed_area2(&boundary.ring(0)) > 0.0);
    assert!(rec.combined.is_empty());
}

#[test]
fn test_clockwise_square_encloses_nothing() {
    let mut cw = SQUARE;
    cw.reverse();
    let mut rec = Recorder::starting_at(4);
    let boundary = resolve(&[contour(&cw, 0)], &mut rec).expect("resolves");
    assert!(boundary.loops.is_empty());
}

#[test]
fn test_hole_keeps_clockwise_loop() {
    let hole = [[0.5, 0.5], [0.5, 1.5], [1.5, 1.5], [1.5, 0.5]];
    let mut rec = Recorder::starting_at(8);
    let boundary = resolve(&[contour(&SQUARE, 0), contour(&hole, 4)], &mut rec).expect("resolves");
    assert_eq!(boundary.loops.len(), 2);
    let mut areas: Vec<f64> = (0..2).map(|i| signed_area2(&boundary.ring(i))).collect();
    areas.sort_by(f64::total_cmp);
    assert!((areas[0] + 2.0).abs() < 1e-12);
    assert!((areas[1] - 8.0).abs() < 1e-12);
}

#[test]
fn test_bowtie_keeps_positive_lobe() {
    let bowtie = [[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]];
    let mut rec = Recorder::starting_at(4);
    let boundary = resolve(&[contour(&bowtie, 0)], &mut rec).expect("resolves");

    assert_eq!(rec.combined, vec![[1.0, 1.0]]);
    assert_eq!(boundary.loops.len(), 1);
    let mut ids = boundary.ids(0);
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 3, 4]);
    assert!(signed_area2(&boundary.ring(0)) > 0.0);
}

#[test]
fn test_overlapping_squares_merge() {
    let shifted = [[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]];
    let mut rec = Recorder::starting_at(8);
    let boundary = resolve(&[contour(&SQUARE, 0), contour(&shifted, 4)], &mut rec).expect("resolves");

    assert_eq!(rec.combined.len(), 2);
    assert_eq!(boundary.loops.len(), 1);
    assert_eq!(boundary.loops[0].len(), 8);
    // Union area: 4 + 4 - 1
    assert!((signed_area2(&boundary.ring(0)) - 14.0).abs() < 1e-9);
}

#[test]
fn test_corner_touching_squares_stay_separate() {
    let corner = [[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0]];
    let mut rec = Recorder::starting_at(8);
    let boundary = resolve(&[contour(&SQUARE, 0), contour(&corner, 4)], &mut rec).expect("resolves");
    assert_eq!(boundary.loops.len(), 2);
    assert!(boundary.loops.iter().all(|l| l.len() == 4));
}

#[test]
fn test_winding_counts_orientation() {
    let ring: Vec<DVec2> = SQUARE.iter().map(|p| DVec2::from(*p)).collect();
    let segs: Vec<(DVec2, DVec2)> = (0..4).map(|i| (ring[i], ring[(i + 1) % 4])).collect();
    assert_eq!(winding(DVec2::new(1.0, 1.0), &segs), 1);
    assert_eq!(winding(DVec2::new(3.0, 1.0), &segs), 0);

    let reversed: Vec<(DVec2, DVec2)> = segs.iter().map(|&(a, b)| (b, a)).collect();
    assert_eq!(winding(DVec2::new(1.0, 1.0), &reversed), -1);
}
