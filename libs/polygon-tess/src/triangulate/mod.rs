//! # Loop Triangulation
//!
//! Groups resolved boundary loops into outlines with the holes they
//! contain, and triangulates each group. Convex hole-free outlines go out
//! as a single fan; everything else is ear-clipped.

use crate::boundary::{winding, Boundary};
use crate::callbacks::{Primitive, TessCallbacks};
use crate::error::TessError;
use crate::{orient, signed_area2};
use earcutr::earcut;
use glam::DVec2;

/// Relative offset used to probe the filled side of a hole edge.
const PROBE_OFFSET: f64 = 1.0e-6;

struct Group {
    outline: usize,
    holes: Vec<usize>,
}

/// Triangulates every outline of `boundary`, emitting CCW triangles.
pub fn triangulate<C>(boundary: &Boundary, callbacks: &mut C) -> Result<usize, TessError>
where
    C: TessCallbacks + ?Sized,
{
    let rings: Vec<Vec<DVec2>> = (0..boundary.loops.len()).map(|i| boundary.ring(i)).collect();
    let areas: Vec<f64> = rings.iter().map(|r| signed_area2(r)).collect();

    let mut groups: Vec<Group> = areas
        .iter()
        .enumerate()
        .filter(|&(_, &a)| a > 0.0)
        .map(|(outline, _)| Group {
            outline,
            holes: Vec::new(),
        })
        .collect();

    for (hole, _) in areas.iter().enumerate().filter(|&(_, &a)| a < 0.0) {
        let probe = filled_side(&rings[hole]);
        let owner = groups
            .iter_mut()
            .filter(|g| winding(probe, &segments(&rings[g.outline])) != 0)
            .min_by(|l, r| areas[l.outline].total_cmp(&areas[r.outline]));
        match owner {
            Some(group) => group.holes.push(hole),
            None => tracing::warn!("hole loop {} lies outside every outline", hole),
        }
    }

    let mut triangles = 0;
    for group in &groups {
        if group.holes.is_empty() && is_convex(&rings[group.outline]) {
            let ids = boundary.ids(group.outline);
            callbacks.begin(Primitive::TriangleFan);
            for &id in &ids {
                callbacks.vertex(id);
            }
            callbacks.end();
            triangles += ids.len() - 2;
            continue;
        }
        triangles += clip_ears(boundary, &rings, group, callbacks)?;
    }
    Ok(triangles)
}

fn segments(ring: &[DVec2]) -> Vec<(DVec2, DVec2)> {
    (0..ring.len())
        .map(|i| (ring[i], ring[(i + 1) % ring.len()]))
        .collect()
}

/// Point just left of the first edge of a hole loop, i.e. inside the
/// material surrounding the hole.
fn filled_side(ring: &[DVec2]) -> DVec2 {
    let (a, b) = (ring[0], ring[1]);
    (a + b) * 0.5 + (b - a).perp() * PROBE_OFFSET
}

fn is_convex(ring: &[DVec2]) -> bool {
    let n = ring.len();
    (0..n).all(|i| orient(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]) > 0.0)
}

fn clip_ears<C>(boundary: &Boundary, rings: &[Vec<DVec2>], group: &Group, callbacks: &mut C) -> Result<usize, TessError>
where
    C: TessCallbacks + ?Sized,
{
    let mut coords = Vec::new();
    let mut ids = Vec::new();
    let mut hole_starts = Vec::new();

    for (k, &ring) in std::iter::once(&group.outline).chain(&group.holes).enumerate() {
        if k > 0 {
            hole_starts.push(ids.len());
        }
        for p in &rings[ring] {
            coords.extend([p.x, p.y]);
        }
        ids.extend(boundary.ids(ring));
    }

    let flat: Vec<DVec2> = std::iter::once(group.outline)
        .chain(group.holes.iter().copied())
        .flat_map(|r| rings[r].iter().copied())
        .collect();

    let indices = earcut(&coords, &hole_starts, 2).map_err(|e| TessError::triangulation(format!("{e:?}")))?;
    if indices.len() % 3 != 0 {
        return Err(TessError::triangulation("index count is not a multiple of 3"));
    }
    if indices.is_empty() {
        tracing::debug!("outline {} produced no triangles", group.outline);
        return Ok(0);
    }

    callbacks.begin(Primitive::Triangles);
    for tri in indices.chunks_exact(3) {
        let (a, mut b, mut c) = (tri[0], tri[1], tri[2]);
        if orient(flat[a], flat[b], flat[c]) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        callbacks.vertex(ids[a]);
        callbacks.vertex(ids[b]);
        callbacks.vertex(ids[c]);
    }
    callbacks.end();
    Ok(indices.len() / 3)
}
