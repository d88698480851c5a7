use footprint_mesh::{
    ErrorKind, Hole, Material, MeshBuffer, Polygon, ShapeRecord, Tessellator, Transform, Wire,
};
use glam::{DVec2, DVec3};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};

type Key = [i64; 3];

fn key(v: DVec3) -> Key {
    let q = (v * 1e9).round();
    [q.x as i64, q.y as i64, q.z as i64]
}

/// Counts directed edges by position across every emitted facet.
fn directed_edges(shapes: &[ShapeRecord]) -> HashMap<(Key, Key), usize> {
    let mut edges = HashMap::new();
    for shape in shapes {
        for facet in &shape.facets {
            for (k, &a) in facet.iter().enumerate() {
                let b = facet[(k + 1) % facet.len()];
                let edge = (key(shape.vertices[a as usize]), key(shape.vertices[b as usize]));
                *edges.entry(edge).or_insert(0) += 1;
            }
        }
    }
    edges
}

/// Every edge is used once in each direction.
fn assert_closed(shapes: &[ShapeRecord]) {
    let edges = directed_edges(shapes);
    assert!(!edges.is_empty());
    for (&(a, b), &count) in &edges {
        assert_eq!(count, 1, "edge {a:?} -> {b:?} used {count} times");
        assert_eq!(edges.get(&(b, a)), Some(&1), "edge {a:?} -> {b:?} has no twin");
    }
}

fn assert_indices_in_range(shapes: &[ShapeRecord]) {
    for shape in shapes {
        for facet in &shape.facets {
            assert!(facet.len() >= 3);
            assert!(facet.iter().all(|&i| (i as usize) < shape.vertices.len()));
        }
    }
}

#[test]
fn body_with_mounting_hole_is_closed() {
    let plastic = Material::new("body");
    let height = Transform::identity().with_translation(DVec3::new(0.0, 0.0, 1.0));

    let mut outline = Polygon::rectangle(0.0);
    outline.calc(6.0, 4.0, &Transform::identity()).unwrap();
    let mut hole = Polygon::circle();
    hole.calc(1.0, 1.0, &Transform::identity().with_translation(DVec3::new(1.5, 0.0, 0.0)))
        .unwrap();

    let mut tess = Tessellator::new();
    tess.add_polygon(&outline, false).unwrap();
    tess.add_polygon(&hole, true).unwrap();

    let mut out = MeshBuffer::new();
    tess.write_shape(true, &height, &plastic, false, &mut out).unwrap();
    tess.write_shape(false, &Transform::identity(), &plastic, true, &mut out).unwrap();
    outline
        .extrude(false, false, true, DVec3::ZERO, &height, &Transform::identity(), &plastic, true, &mut out)
        .unwrap();
    hole.extrude(false, false, false, DVec3::ZERO, &height, &Transform::identity(), &plastic, true, &mut out)
        .unwrap();

    assert_indices_in_range(out.shapes());
    assert_closed(out.shapes());

    let hole_area = 8.0 * 0.25 * (TAU / 16.0).sin();
    let hole_walls = 16.0 * (TAU / 32.0).sin();
    let expected = 2.0 * (24.0 - hole_area) + 20.0 + hole_walls;
    assert!((out.area() - expected).abs() < 1e-9, "area {} != {}", out.area(), expected);
}

#[test]
fn framed_cutout_is_closed() {
    let housing = Material::new("housing");
    let lid = Transform::identity().with_translation(DVec3::new(0.0, 0.0, 0.8));
    let origin = Transform::identity();

    let mut cutout = Hole::ellipse(16).unwrap();
    cutout
        .calc(DVec2::new(5.0, 3.0), DVec2::new(1.5, 1.0), DVec2::new(-1.0, 0.25), &origin)
        .unwrap();

    let mut out = MeshBuffer::new();
    cutout.build(true, &lid, &housing, false, &mut out).unwrap();
    cutout.build(false, &origin, &housing, true, &mut out).unwrap();
    cutout
        .frame()
        .extrude(false, false, true, DVec3::ZERO, &lid, &origin, &housing, true, &mut out)
        .unwrap();
    cutout
        .opening()
        .extrude(false, false, false, DVec3::ZERO, &lid, &origin, &housing, true, &mut out)
        .unwrap();

    assert_indices_in_range(out.shapes());
    assert_closed(out.shapes());
}

#[test]
fn bent_lead_is_closed_and_measured() {
    let mut profile = Polygon::ellipse(12).unwrap();
    profile.calc(0.3, 0.3, &Transform::identity()).unwrap();

    let mut lead = Wire::new();
    lead.set_params(6, 0.5).unwrap();
    for p in [[0.0, 0.0, 2.0], [3.0, 0.0, 2.0], [3.0, 0.0, -1.0]] {
        lead.add_point(DVec3::from(p)).unwrap();
    }

    let mut out = MeshBuffer::new();
    let summary = lead
        .build(&profile, true, true, true, &Transform::identity(), &Material::new("tin"), false, &mut out)
        .unwrap();

    // 2.5 + quarter arc of radius 0.5 + 2.5
    assert!((summary.length - (5.0 + 0.5 * FRAC_PI_2)).abs() < 1e-9);
    assert_eq!(summary.stations.len(), 1 + 6 + 1);
    assert_indices_in_range(out.shapes());
    assert_closed(out.shapes());
}

#[test]
fn output_transform_moves_the_whole_lead() {
    let mut profile = Polygon::rectangle(0.0);
    profile.calc(0.2, 0.2, &Transform::identity()).unwrap();
    let mut lead = Wire::new();
    lead.add_point(DVec3::ZERO).unwrap();
    lead.add_point(DVec3::new(0.0, 0.0, -3.0)).unwrap();

    let placed = Transform::identity()
        .with_rotation(DVec3::Z, FRAC_PI_2)
        .with_translation(DVec3::new(10.0, 0.0, 0.0));
    let mut out = MeshBuffer::new();
    lead.build(&profile, false, false, true, &placed, &Material::new("tin"), false, &mut out)
        .unwrap();

    let vertices = &out.shapes()[0].vertices;
    let center = vertices.iter().copied().sum::<DVec3>() / vertices.len() as f64;
    assert!((center - DVec3::new(10.0, 0.0, -1.5)).length() < 1e-9);
}

#[test]
fn failures_are_classified() {
    let mut lead = Wire::new();
    lead.add_point(DVec3::ZERO).unwrap();
    let mut profile = Polygon::rectangle(0.0);
    profile.calc(0.2, 0.2, &Transform::identity()).unwrap();

    let mut out = MeshBuffer::new();
    let material = Material::new("tin");
    let err = lead
        .build(&profile, false, false, true, &Transform::identity(), &material, false, &mut out)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);

    let mut tess = Tessellator::new();
    let err = tess.tesselate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryDegenerate);

    let err = Polygon::rectangle(0.0)
        .calc(-1.0, 1.0, &Transform::identity())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}
