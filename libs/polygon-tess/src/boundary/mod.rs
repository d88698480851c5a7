//! # Boundary Extraction
//!
//! Turns a set of possibly overlapping or self-intersecting contours into
//! closed loops bounding the region of positive winding number.
//!
//! ## Algorithm
//!
//! 1. Intern vertices by exact coordinates into a node table
//! 2. Split every edge at crossings (minting combine vertices) and at
//!    vertices lying on its interior
//! 3. Keep a split edge when positive winding lies on exactly one side,
//!    oriented so that side is on its left
//! 4. Link kept edges into loops, turning as far left as possible at
//!    shared nodes so touching loops stay separate

use crate::callbacks::TessCallbacks;
use crate::error::TessError;
use crate::orient;
use glam::DVec2;
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Relative distance from an edge midpoint at which side windings are sampled.
const SIDE_OFFSET: f64 = 1.0e-6;

// =============================================================================
// TYPES
// =============================================================================

/// Input vertex: position plus caller id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Planar position
    pub pos: DVec2,
    /// Caller id echoed back through the callbacks
    pub id: usize,
}

/// Distinct position in the planar graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Planar position
    pub pos: DVec2,
    /// Id of the first vertex interned at this position
    pub id: usize,
}

/// Resolved region boundary.
#[derive(Debug, Clone, Default)]
pub struct Boundary {
    /// Node table shared by all loops
    pub nodes: Vec<Node>,
    /// Loops as node indices; solids wind CCW, holes CW
    pub loops: Vec<Vec<usize>>,
}

impl Boundary {
    /// Positions of one loop.
    pub fn ring(&self, index: usize) -> Vec<DVec2> {
        self.loops[index].iter().map(|&n| self.nodes[n].pos).collect()
    }

    /// Caller ids of one loop.
    pub fn ids(&self, index: usize) -> Vec<usize> {
        self.loops[index].iter().map(|&n| self.nodes[n].id).collect()
    }
}

#[derive(Debug)]
struct Edge {
    a: usize,
    b: usize,
    splits: Vec<(f64, usize)>,
}

#[derive(Debug, Default)]
struct Graph {
    nodes: Vec<Node>,
    lookup: HashMap<(u64, u64), usize>,
}

impl Graph {
    fn key(pos: DVec2) -> (u64, u64) {
        // Adding 0.0 folds -0.0 onto 0.0.
        ((pos.x + 0.0).to_bits(), (pos.y + 0.0).to_bits())
    }

    fn find(&self, pos: DVec2) -> Option<usize> {
        self.lookup.get(&Self::key(pos)).copied()
    }

    fn intern(&mut self, pos: DVec2, id: usize) -> usize {
        if let Some(n) = self.find(pos) {
            return n;
        }
        let n = self.nodes.len();
        self.nodes.push(Node { pos, id });
        self.lookup.insert(Self::key(pos), n);
        n
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Resolves `contours` into positive-winding boundary loops.
pub fn resolve<C>(contours: &[Vec<Vertex>], callbacks: &mut C) -> Result<Boundary, TessError>
where
    C: TessCallbacks + ?Sized,
{
    let mut graph = Graph::default();
    let mut edges = Vec::new();
    for contour in contours {
        let ring: Vec<usize> = contour.iter().map(|v| graph.intern(v.pos, v.id)).collect();
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            if a != b {
                edges.push(Edge {
                    a,
                    b,
                    splits: Vec::new(),
                });
            }
        }
    }

    let segments: Vec<(DVec2, DVec2)> = edges
        .iter()
        .map(|e| (graph.nodes[e.a].pos, graph.nodes[e.b].pos))
        .collect();

    split_edges(&mut edges, &segments, &mut graph, callbacks);

    let mut kept = Vec::new();
    let mut seen = HashSet::new();
    for edge in &edges {
        for (p, q) in sub_edges(edge) {
            let directed = classify(graph.nodes[p].pos, graph.nodes[q].pos, &segments)
                .map(|forward| if forward { (p, q) } else { (q, p) });
            if let Some(directed) = directed {
                if seen.insert(directed) {
                    kept.push(directed);
                }
            }
        }
    }

    let loops = link_loops(&kept, &graph.nodes)?;
    tracing::debug!(
        "boundary: {} edges, {} nodes, {} loops",
        edges.len(),
        graph.nodes.len(),
        loops.len()
    );
    Ok(Boundary {
        nodes: graph.nodes,
        loops,
    })
}

// =============================================================================
// EDGE SPLITTING
// =============================================================================

fn split_edges<C>(edges: &mut [Edge], segments: &[(DVec2, DVec2)], graph: &mut Graph, callbacks: &mut C)
where
    C: TessCallbacks + ?Sized,
{
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (a, b) = segments[i];
            let (c, d) = segments[j];
            if !boxes_overlap(a, b, c, d) {
                continue;
            }

            let o1 = orient(a, b, c);
            let o2 = orient(a, b, d);
            let o3 = orient(c, d, a);
            let o4 = orient(c, d, b);

            if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
                let r = b - a;
                let s = d - c;
                let denom = r.perp_dot(s);
                let t = ((c - a).perp_dot(s) / denom).clamp(0.0, 1.0);
                let u = ((c - a).perp_dot(r) / denom).clamp(0.0, 1.0);
                let p = a + r * t;
                let node = match graph.find(p) {
                    Some(n) => n,
                    None => {
                        let sources = [
                            Some(graph.nodes[edges[i].a].id),
                            Some(graph.nodes[edges[i].b].id),
                            Some(graph.nodes[edges[j].a].id),
                            Some(graph.nodes[edges[j].b].id),
                        ];
                        let weights = [(1.0 - t) / 2.0, t / 2.0, (1.0 - u) / 2.0, u / 2.0];
                        let id = callbacks.combine([p.x, p.y], sources, weights);
                        graph.intern(p, id)
                    }
                };
                edges[i].splits.push((t, node));
                edges[j].splits.push((u, node));
                continue;
            }

            // Endpoints resting on the other edge's interior.
            let (ja, jb) = (edges[j].a, edges[j].b);
            let (ia, ib) = (edges[i].a, edges[i].b);
            for (o, node, pos) in [(o1, ja, c), (o2, jb, d)] {
                if o == 0.0 {
                    if let Some(t) = interior_param(a, b, pos) {
                        edges[i].splits.push((t, node));
                    }
                }
            }
            for (o, node, pos) in [(o3, ia, a), (o4, ib, b)] {
                if o == 0.0 {
                    if let Some(t) = interior_param(c, d, pos) {
                        edges[j].splits.push((t, node));
                    }
                }
            }
        }
    }
}

fn boxes_overlap(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let (lo1, hi1) = (a.min(b), a.max(b));
    let (lo2, hi2) = (c.min(d), c.max(d));
    lo1.x <= hi2.x && lo2.x <= hi1.x && lo1.y <= hi2.y && lo2.y <= hi1.y
}

/// Parameter of `p` along `a → b` when it lies strictly between the ends.
fn interior_param(a: DVec2, b: DVec2, p: DVec2) -> Option<f64> {
    if p == a || p == b {
        return None;
    }
    let r = b - a;
    let t = (p - a).dot(r) / r.length_squared();
    (t > 0.0 && t < 1.0).then_some(t)
}

fn sub_edges(edge: &Edge) -> Vec<(usize, usize)> {
    let mut splits = edge.splits.clone();
    splits.sort_by(|l, r| l.0.total_cmp(&r.0));

    let mut chain = vec![edge.a];
    chain.extend(splits.into_iter().map(|(_, n)| n));
    chain.push(edge.b);
    chain.dedup();

    chain.windows(2).map(|w| (w[0], w[1])).collect()
}

// =============================================================================
// WINDING
// =============================================================================

/// Winding number of `p` with respect to closed `segments`.
pub fn winding(p: DVec2, segments: &[(DVec2, DVec2)]) -> i32 {
    let mut wn = 0;
    for &(a, b) in segments {
        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// `Some(true)` keeps `p → q`, `Some(false)` keeps `q → p`, `None` drops it.
fn classify(p: DVec2, q: DVec2, segments: &[(DVec2, DVec2)]) -> Option<bool> {
    let dir = q - p;
    let mid = (p + q) * 0.5;
    let offset = dir.perp() * SIDE_OFFSET;
    let left = winding(mid + offset, segments) > 0;
    let right = winding(mid - offset, segments) > 0;
    match (left, right) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

// =============================================================================
// LOOP LINKING
// =============================================================================

/// Clockwise angle from `back` to `out`, in `(0, 2π]`.
fn clockwise_turn(back: DVec2, out: DVec2) -> f64 {
    let angle = (back.y.atan2(back.x) - out.y.atan2(out.x)).rem_euclid(TAU);
    if angle <= 0.0 {
        TAU
    } else {
        angle
    }
}

fn link_loops(kept: &[(usize, usize)], nodes: &[Node]) -> Result<Vec<Vec<usize>>, TessError> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (e, &(from, _)) in kept.iter().enumerate() {
        outgoing[from].push(e);
    }

    let mut used = vec![false; kept.len()];
    let mut loops = Vec::new();
    for start in 0..kept.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (origin, mut cur) = kept[start];
        let mut prev = origin;
        let mut ring = vec![origin];

        while cur != origin {
            ring.push(cur);
            let here = nodes[cur].pos;
            let back = nodes[prev].pos - here;
            let next = outgoing[cur]
                .iter()
                .copied()
                .filter(|&e| !used[e])
                .min_by(|&l, &r| {
                    let tl = clockwise_turn(back, nodes[kept[l].1].pos - here);
                    let tr = clockwise_turn(back, nodes[kept[r].1].pos - here);
                    tl.total_cmp(&tr)
                })
                .ok_or(TessError::OpenBoundary { id: nodes[cur].id })?;
            used[next] = true;
            prev = cur;
            cur = kept[next].1;
        }

        if ring.len() >= 3 {
            loops.push(ring);
        }
    }
    Ok(loops)
}

#[cfg(test)]
mod tests;
