//! # Contour Tessellation
//!
//! Triangulates planar outlines with holes (board outlines, package bodies
//! with cut-outs) into a vertex list and a triangle index list.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──add_vertex / add_polygon──► Accumulating ──tesselate──► Fixed
//!   ▲                                                               │
//!   └──────────────────────────── clear ◄───────────────────────────┘
//! ```
//!
//! ## Passes
//!
//! 1. **Outline**: solid contours in boundary-only mode, merging overlaps
//!    into one consistent outline
//! 2. **Ordering**: outline plus holes in boundary-only mode; every vertex
//!    on the result gets its output index
//! 3. **Full**: outline plus holes triangulated; fans, strips and lists are
//!    split into triangles and degenerate ones dropped

mod filter;

use crate::error::{ErrorKind, GeomError, GeomResult};
use crate::polygon::Polygon;
use crate::sink::{Appearance, MeshSink, ShapeData};
use crate::transform::Transform;
use glam::{DVec2, DVec3};
use polygon_tess::{Primitive, TessCallbacks, TessError};

/// Handle to a contour of a [`Tessellator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContourId(usize);

impl ContourId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    Accumulating,
    Fixed,
}

#[derive(Debug, Clone, Copy)]
struct TessVertex {
    pos: DVec2,
    order: Option<u32>,
}

#[derive(Debug, Clone, Default)]
struct Contour {
    vertices: Vec<usize>,
    /// Twice the signed area, without the closing edge
    partial: f64,
}

/// Contour-to-triangle engine.
#[derive(Debug, Clone)]
pub struct Tessellator {
    state: State,
    vertices: Vec<TessVertex>,
    contours: Vec<Contour>,
    order: Vec<usize>,
    triplets: Vec<[u32; 3]>,
    fault: bool,
    error: Option<GeomError>,
    engine: polygon_tess::Tessellator,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            vertices: Vec::new(),
            contours: Vec::new(),
            order: Vec::new(),
            triplets: Vec::new(),
            fault: false,
            error: None,
            engine: polygon_tess::Tessellator::new(),
        }
    }

    /// Releases all contours and results.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // =========================================================================
    // ACCUMULATION
    // =========================================================================

    /// Opens a new, empty contour.
    pub fn new_contour(&mut self) -> GeomResult<ContourId> {
        self.ensure_open()?;
        self.contours.try_reserve(1)?;
        self.contours.push(Contour::default());
        self.state = State::Accumulating;
        Ok(ContourId(self.contours.len() - 1))
    }

    /// Appends a vertex to `contour`, updating its running area.
    pub fn add_vertex(&mut self, contour: ContourId, x: f64, y: f64) -> GeomResult<()> {
        self.ensure_open()?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(GeomError::invalid(format!("non-finite vertex ({x}, {y})")));
        }
        let c = self
            .contours
            .get_mut(contour.0)
            .ok_or_else(|| GeomError::invalid(format!("no contour with id {}", contour.0)))?;
        self.vertices.try_reserve(1)?;
        c.vertices.try_reserve(1)?;

        let pos = DVec2::new(x, y);
        if let Some(&prev) = c.vertices.last() {
            c.partial += self.vertices[prev].pos.perp_dot(pos);
        }
        c.vertices.push(self.vertices.len());
        self.vertices.push(TessVertex { pos, order: None });
        Ok(())
    }

    /// Registers a calculated polygon's ring (XY) as a new contour and
    /// fixes its winding for the given role.
    pub fn add_polygon(&mut self, polygon: &Polygon, is_hole: bool) -> GeomResult<ContourId> {
        let view = polygon.view()?;
        let id = self.new_contour()?;
        for v in view.vertices() {
            self.add_vertex(id, v.x, v.y)?;
        }
        self.ensure_winding(id, is_hole)?;
        Ok(id)
    }

    /// Signed area of a contour; positive when it winds CCW about `+Z`.
    pub fn contour_area(&self, contour: ContourId) -> GeomResult<f64> {
        let c = self
            .contours
            .get(contour.0)
            .ok_or_else(|| GeomError::invalid(format!("no contour with id {}", contour.0)))?;
        Ok(self.closed_area2(c) / 2.0)
    }

    fn closed_area2(&self, c: &Contour) -> f64 {
        match (c.vertices.first(), c.vertices.last()) {
            (Some(&first), Some(&last)) => c.partial + self.vertices[last].pos.perp_dot(self.vertices[first].pos),
            _ => 0.0,
        }
    }

    /// Reverses `contour` when its winding disagrees with its role: solids
    /// end up CCW (area > 0), holes CW (area <= 0).
    pub fn ensure_winding(&mut self, contour: ContourId, is_hole: bool) -> GeomResult<()> {
        self.ensure_open()?;
        let area = self.contour_area(contour)?;
        if (is_hole && area > 0.0) || (!is_hole && area <= 0.0) {
            let c = &mut self.contours[contour.0];
            c.vertices.reverse();
            let ring = &c.vertices;
            c.partial = ring
                .windows(2)
                .map(|w| self.vertices[w[0]].pos.perp_dot(self.vertices[w[1]].pos))
                .sum();
        }
        Ok(())
    }

    fn ensure_open(&self) -> GeomResult<()> {
        if self.state == State::Fixed {
            return Err(GeomError::invalid("tessellator is fixed; clear it before adding contours"));
        }
        Ok(())
    }

    // =========================================================================
    // TESSELLATION
    // =========================================================================

    /// Runs the outline, ordering and full passes.
    ///
    /// Once invoked the tessellator is fixed, whatever the outcome.
    pub fn tesselate(&mut self) -> GeomResult<()> {
        if self.state == State::Fixed {
            return match &self.error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            };
        }

        let total: usize = self.contours.iter().map(|c| c.vertices.len()).sum();
        self.state = State::Fixed;
        self.order.clear();
        self.triplets.clear();
        if total < 3 || self.contours.is_empty() {
            return Err(self.fail(GeomError::degenerate("not enough vertices")));
        }

        let mut solids = Vec::new();
        let mut holes = Vec::new();
        for c in &self.contours {
            if c.vertices.len() < 3 {
                continue;
            }
            let area = self.closed_area2(c);
            if area > 0.0 {
                solids.push(c.vertices.clone());
            } else if area < 0.0 {
                holes.push(c.vertices.clone());
            } else {
                tracing::debug!("dropping zero-area contour of {} vertices", c.vertices.len());
            }
        }
        if solids.is_empty() {
            return Err(self.fail(GeomError::degenerate("no valid contours")));
        }

        let outline = self.run_pass(&solids, true)?;
        if outline.is_empty() {
            return Err(self.fail(GeomError::degenerate("no valid contours")));
        }

        for v in &mut self.vertices {
            v.order = None;
        }
        self.order.clear();
        let mut merged = outline;
        merged.extend(holes);
        self.run_pass(&merged, true)?;
        self.run_pass(&merged, false)?;

        if self.order.is_empty() || self.triplets.is_empty() {
            return Err(self.fail(GeomError::degenerate("no points in result")));
        }
        tracing::debug!(
            "tessellated {} contours into {} vertices and {} triangles",
            self.contours.len(),
            self.order.len(),
            self.triplets.len()
        );
        Ok(())
    }

    fn run_pass(&mut self, contours: &[Vec<usize>], boundary_only: bool) -> GeomResult<Vec<Vec<usize>>> {
        let fed = self.feed(contours, boundary_only);
        let mut pass = Pass::new(&mut self.vertices, &mut self.order, &mut self.triplets);
        let result = fed.and_then(|()| self.engine.end_polygon(&mut pass));
        let Pass { loops, error, .. } = pass;
        match (result, error) {
            (Ok(()), None) => Ok(loops),
            (Ok(()), Some(message)) => Err(self.fail(GeomError::tessellation(message))),
            (Err(e), error) => {
                let message = error.unwrap_or_else(|| e.to_string());
                Err(self.fail(GeomError::tessellation(message)))
            }
        }
    }

    fn feed(&mut self, contours: &[Vec<usize>], boundary_only: bool) -> Result<(), TessError> {
        self.engine.set_boundary_only(boundary_only);
        self.engine.begin_polygon()?;
        for contour in contours {
            self.engine.begin_contour()?;
            for &v in contour {
                self.engine.vertex(self.vertices[v].pos.to_array(), v)?;
            }
            self.engine.end_contour()?;
        }
        Ok(())
    }

    fn fail(&mut self, err: GeomError) -> GeomError {
        tracing::warn!("tesselate failed: {}", err);
        if err.kind() == ErrorKind::TessellationFault {
            self.fault = true;
        }
        self.error = Some(err.clone());
        err
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Output vertices in index order, lifted to `z = 0` and transformed.
    pub fn write_vertices(&self, transform: &Transform) -> GeomResult<Vec<DVec3>> {
        self.ensure_result()?;
        if self.order.len() < 3 {
            return Err(GeomError::degenerate("not enough vertices"));
        }
        let mut out = crate::error::alloc_vec(self.order.len())?;
        out.extend(self.order.iter().map(|&v| self.vertices[v].pos.extend(0.0)));
        transform.apply_all(&mut out);
        Ok(out)
    }

    /// Triangle indices; bottom-facing output swaps the first two.
    pub fn write_indices(&self, is_top: bool) -> GeomResult<Vec<[u32; 3]>> {
        self.ensure_result()?;
        if self.triplets.is_empty() {
            return Err(GeomError::degenerate("no triangles in result"));
        }
        Ok(self
            .triplets
            .iter()
            .map(|&[a, b, c]| if is_top { [a, b, c] } else { [b, a, c] })
            .collect())
    }

    /// Tessellates when needed, then emits vertices and triangles as one
    /// shape.
    pub fn write_shape(
        &mut self,
        is_top: bool,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        self.tesselate()?;
        let vertices = self.write_vertices(transform)?;
        let facets: Vec<Vec<u32>> = self.write_indices(is_top)?.iter().map(|t| t.to_vec()).collect();
        sink.write_shape(&ShapeData {
            appearance,
            reuse,
            vertices: &vertices,
            facets: &facets,
        })
    }

    fn ensure_result(&self) -> GeomResult<()> {
        if self.state != State::Fixed {
            return Err(GeomError::degenerate("tesselate has not been invoked"));
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// All vertices, including those synthesized at edge crossings.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex by creation index.
    pub fn vertex_by_index(&self, index: usize) -> Option<DVec2> {
        self.vertices.get(index).map(|v| v.pos)
    }

    #[inline]
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Vertices in the output order map.
    #[inline]
    pub fn output_len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triplets.len()
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.state == State::Fixed
    }

    /// True when the tessellation primitive reported a fault.
    #[inline]
    pub fn fault(&self) -> bool {
        self.fault
    }

    /// Message of the last failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(GeomError::message)
    }
}

// =============================================================================
// PASS CALLBACKS
// =============================================================================

/// Receives one pass of primitive output.
struct Pass<'a> {
    vertices: &'a mut Vec<TessVertex>,
    order: &'a mut Vec<usize>,
    triplets: &'a mut Vec<[u32; 3]>,
    primitive: Primitive,
    group: Vec<usize>,
    loops: Vec<Vec<usize>>,
    rejected: usize,
    error: Option<String>,
}

impl<'a> Pass<'a> {
    fn new(vertices: &'a mut Vec<TessVertex>, order: &'a mut Vec<usize>, triplets: &'a mut Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            order,
            triplets,
            primitive: Primitive::Triangles,
            group: Vec::new(),
            loops: Vec::new(),
            rejected: 0,
            error: None,
        }
    }

    /// Output index of a vertex, assigning the next one on first sight.
    ///
    /// `None` once the output no longer fits `u32` indices; the pass then
    /// carries an error.
    fn order_of(&mut self, v: usize) -> Option<u32> {
        if let Some(o) = self.vertices[v].order {
            return Some(o);
        }
        let Some(o) = output_index(self.order.len()) else {
            self.error = Some(format!("output exceeds {} vertices", u32::MAX));
            return None;
        };
        self.order.push(v);
        self.vertices[v].order = Some(o);
        Some(o)
    }

    fn add_triplet(&mut self, a: usize, b: usize, c: usize) {
        let (p0, p1, p2) = (self.vertices[a].pos, self.vertices[b].pos, self.vertices[c].pos);
        if filter::is_degenerate(p0, p1, p2) {
            self.rejected += 1;
            return;
        }
        if let (Some(i), Some(j), Some(k)) = (self.order_of(a), self.order_of(b), self.order_of(c)) {
            self.triplets.push([i, j, k]);
        }
    }
}

/// Index for the `len`-th output vertex.
fn output_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

impl TessCallbacks for Pass<'_> {
    fn begin(&mut self, primitive: Primitive) {
        self.primitive = primitive;
        self.group.clear();
    }

    fn vertex(&mut self, id: usize) {
        self.group.push(id);
    }

    fn end(&mut self) {
        let group = std::mem::take(&mut self.group);
        match self.primitive {
            Primitive::LineLoop => {
                for &v in &group {
                    self.order_of(v);
                }
                self.loops.push(group);
            }
            Primitive::TriangleFan => {
                for i in 2..group.len() {
                    self.add_triplet(group[0], group[i - 1], group[i]);
                }
            }
            Primitive::TriangleStrip => {
                for i in 2..group.len() {
                    if i % 2 == 0 {
                        self.add_triplet(group[i - 2], group[i - 1], group[i]);
                    } else {
                        self.add_triplet(group[i - 1], group[i - 2], group[i]);
                    }
                }
            }
            Primitive::Triangles => {
                for t in group.chunks_exact(3) {
                    self.add_triplet(t[0], t[1], t[2]);
                }
            }
        }
        if self.rejected > 0 {
            tracing::debug!("rejected {} degenerate triangles", self.rejected);
            self.rejected = 0;
        }
    }

    fn combine(&mut self, coords: [f64; 2], _sources: [Option<usize>; 4], _weights: [f64; 4]) -> usize {
        let pos = DVec2::from(coords);
        if let Some(existing) = self.vertices.iter().position(|v| v.pos == pos) {
            return existing;
        }
        self.vertices.push(TessVertex { pos, order: None });
        self.vertices.len() - 1
    }

    fn error(&mut self, error: &TessError) {
        self.error = Some(error.to_string());
    }
}
