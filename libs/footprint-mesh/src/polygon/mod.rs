//! # Polygon Primitives
//!
//! Closed vertex rings in the XY plane, centered on the origin when
//! calculated and then placed by a transform. A ring can be painted as a
//! single face, stitched to another ring of the same size, or extruded by a
//! sweep transform into a lofted segment.
//!
//! ## Shapes
//!
//! - **Rectangle**: 4 corners, or 8 when a bevel clips each corner
//! - **Ellipse**: `segments` vertices starting on the +X axis
//! - **Outline**: caller points rescaled to the requested extents
//!
//! All rings wind counter-clockwise about `+Z` before transformation.

mod view;

pub use view::PolygonView;

use crate::error::{alloc_vec, GeomError, GeomResult};
use crate::sink::{Appearance, MeshSink};
use crate::transform::Transform;
use config::constants::{DEFAULT_SEGMENTS, MAX_RADIUS, MAX_SEGMENTS, MIN_EXTENT, MIN_RADIUS, MIN_SEGMENTS};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

/// Shape of a [`Polygon`] and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonKind {
    /// Axis-aligned rectangle, corners clipped by `bevel` when positive
    Rectangle { bevel: f64 },
    /// Ellipse approximated by `segments` vertices
    Ellipse { segments: u32 },
    /// Arbitrary CCW outline, rescaled to the requested extents
    Outline { points: Vec<DVec2> },
}

/// An owned vertex ring.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::{Polygon, Transform};
///
/// let mut pin = Polygon::ellipse(12).unwrap();
/// pin.calc(0.6, 0.6, &Transform::identity()).unwrap();
/// assert_eq!(pin.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    kind: PolygonKind,
    vertices: Vec<DVec3>,
    valid: bool,
}

impl Polygon {
    fn with_kind(kind: PolygonKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            valid: false,
        }
    }

    /// Rectangle with corner bevel (0 for sharp corners).
    pub fn rectangle(bevel: f64) -> Self {
        Self::with_kind(PolygonKind::Rectangle { bevel })
    }

    /// Ellipse with `segments` vertices.
    pub fn ellipse(segments: u32) -> GeomResult<Self> {
        check_segments(segments)?;
        Ok(Self::with_kind(PolygonKind::Ellipse { segments }))
    }

    /// Ellipse with the default vertex count.
    pub fn circle() -> Self {
        Self::with_kind(PolygonKind::Ellipse {
            segments: DEFAULT_SEGMENTS,
        })
    }

    /// Outline through `points`, which must wind CCW and span a non-zero
    /// area on both axes.
    pub fn outline(points: Vec<DVec2>) -> GeomResult<Self> {
        if points.len() < 3 {
            return Err(GeomError::invalid(format!(
                "outline has {} points (min: 3)",
                points.len()
            )));
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(GeomError::invalid("outline has non-finite points"));
        }
        let size = bounds(&points).1;
        if size.min_element() < MIN_EXTENT {
            return Err(GeomError::invalid("outline spans no area"));
        }
        Ok(Self::with_kind(PolygonKind::Outline { points }))
    }

    #[inline]
    pub fn kind(&self) -> &PolygonKind {
        &self.kind
    }

    /// Changes the bevel of a rectangle. The ring must be recalculated.
    pub fn set_bevel(&mut self, bevel: f64) -> GeomResult<()> {
        match &mut self.kind {
            PolygonKind::Rectangle { bevel: b } => {
                *b = bevel;
                self.invalidate();
                Ok(())
            }
            _ => Err(GeomError::invalid("bevel applies to rectangles only")),
        }
    }

    /// Changes the vertex count of an ellipse. The ring must be recalculated.
    pub fn set_segments(&mut self, segments: u32) -> GeomResult<()> {
        check_segments(segments)?;
        match &mut self.kind {
            PolygonKind::Ellipse { segments: s } => {
                *s = segments;
                self.invalidate();
                Ok(())
            }
            _ => Err(GeomError::invalid("segments apply to ellipses only")),
        }
    }

    /// True once `calc` has produced a ring.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn invalidate(&mut self) {
        self.vertices.clear();
        self.valid = false;
    }

    // =========================================================================
    // CALC
    // =========================================================================

    /// Builds the ring for the given extents, then applies `transform`.
    ///
    /// Any previous ring is discarded first, so a failed call leaves the
    /// polygon invalid.
    pub fn calc(&mut self, extent_x: f64, extent_y: f64, transform: &Transform) -> GeomResult<()> {
        self.invalidate();
        let mut ring = match &self.kind {
            PolygonKind::Rectangle { bevel } => rectangle_ring(extent_x, extent_y, *bevel)?,
            PolygonKind::Ellipse { segments } => ellipse_ring(extent_x, extent_y, *segments)?,
            PolygonKind::Outline { points } => outline_ring(points, extent_x, extent_y)?,
        };
        transform.apply_all(&mut ring);
        self.vertices = ring;
        self.valid = true;
        Ok(())
    }

    // =========================================================================
    // EMISSION
    // =========================================================================

    /// Borrowed view of the calculated ring.
    pub fn view(&self) -> GeomResult<PolygonView<'_>> {
        if !self.valid {
            return Err(GeomError::degenerate("invoked without prior invocation of calc"));
        }
        PolygonView::new(&self.vertices)
    }

    /// Emits the ring as a single face. See [`PolygonView::paint`].
    pub fn paint(
        &self,
        is_ccw: bool,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        self.view()?.paint(is_ccw, transform, appearance, reuse, sink)
    }

    /// Lofts this ring to `other`. See [`PolygonView::stitch`].
    pub fn stitch(
        &self,
        is_ccw: bool,
        other: &Polygon,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        self.view()?
            .stitch(is_ccw, &other.view()?, transform, appearance, reuse, sink)
    }

    /// Sweeps a copy of the ring and lofts the original to it.
    ///
    /// The copy is moved so that `start` is the pivot of `sweep`
    /// (`p' = sweep(p - start) + start`). `cap0` paints the original ring
    /// facing back, `cap1` the swept ring facing forward. `transform`
    /// only affects the emitted output. Returns the swept ring.
    #[allow(clippy::too_many_arguments)]
    pub fn extrude(
        &self,
        cap0: bool,
        cap1: bool,
        is_ccw: bool,
        start: DVec3,
        sweep: &Transform,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<Polygon> {
        let view = self.view()?;
        let mut swept = alloc_vec(view.len())?;
        swept.extend(view.vertices().iter().map(|&p| sweep.transform_point(p - start) + start));
        let swept = Polygon {
            kind: self.kind.clone(),
            vertices: swept,
            valid: true,
        };

        self.stitch(is_ccw, &swept, transform, appearance, reuse, sink)?;
        if cap0 {
            self.paint(!is_ccw, transform, appearance, true, sink)?;
        }
        if cap1 {
            swept.paint(is_ccw, transform, appearance, true, sink)?;
        }
        Ok(swept)
    }

    /// Transforms the stored ring in place.
    pub fn xform(&mut self, transform: &Transform) -> GeomResult<()> {
        if !self.valid {
            return Err(GeomError::degenerate("invoked without prior invocation of calc"));
        }
        transform.apply_all(&mut self.vertices);
        Ok(())
    }
}

// =============================================================================
// RING BUILDERS
// =============================================================================

fn check_segments(segments: u32) -> GeomResult<()> {
    if (MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
        Ok(())
    } else {
        Err(GeomError::invalid(format!(
            "segments must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}: {segments}"
        )))
    }
}

fn check_extent(name: &str, value: f64) -> GeomResult<()> {
    if value.is_finite() && value >= MIN_EXTENT {
        Ok(())
    } else {
        Err(GeomError::invalid(format!(
            "{name} ({value}) is degenerate, must be >= {MIN_EXTENT}"
        )))
    }
}

fn rectangle_ring(xl: f64, yl: f64, bevel: f64) -> GeomResult<Vec<DVec3>> {
    check_extent("length", xl)?;
    check_extent("width", yl)?;
    if !bevel.is_finite() || bevel < 0.0 {
        return Err(GeomError::invalid(format!("invalid bevel: {bevel}")));
    }
    let (hx, hy) = (xl / 2.0, yl / 2.0);

    if bevel == 0.0 {
        let mut ring = alloc_vec(4)?;
        ring.extend([
            DVec3::new(hx, -hy, 0.0),
            DVec3::new(hx, hy, 0.0),
            DVec3::new(-hx, hy, 0.0),
            DVec3::new(-hx, -hy, 0.0),
        ]);
        return Ok(ring);
    }

    if bevel >= hx || bevel >= hy {
        return Err(GeomError::invalid(format!(
            "bevel ({bevel}) must be less than half of each side ({xl} x {yl})"
        )));
    }
    let mut ring = alloc_vec(8)?;
    ring.extend([
        DVec3::new(hx - bevel, -hy, 0.0),
        DVec3::new(hx, -hy + bevel, 0.0),
        DVec3::new(hx, hy - bevel, 0.0),
        DVec3::new(hx - bevel, hy, 0.0),
        DVec3::new(-hx + bevel, hy, 0.0),
        DVec3::new(-hx, hy - bevel, 0.0),
        DVec3::new(-hx, -hy + bevel, 0.0),
        DVec3::new(-hx + bevel, -hy, 0.0),
    ]);
    Ok(ring)
}

fn ellipse_ring(dx: f64, dy: f64, segments: u32) -> GeomResult<Vec<DVec3>> {
    check_segments(segments)?;
    let (rx, ry) = (dx / 2.0, dy / 2.0);
    for r in [rx, ry] {
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&r) {
            return Err(GeomError::invalid(format!(
                "radius ({r}) must be in {MIN_RADIUS}..={MAX_RADIUS}"
            )));
        }
    }
    let n = segments as usize;
    let step = TAU / f64::from(segments);
    let mut ring = alloc_vec(n)?;
    ring.extend((0..n).map(|i| {
        let (sin, cos) = (step * i as f64).sin_cos();
        DVec3::new(rx * cos, ry * sin, 0.0)
    }));
    Ok(ring)
}

fn outline_ring(points: &[DVec2], xl: f64, yl: f64) -> GeomResult<Vec<DVec3>> {
    check_extent("length", xl)?;
    check_extent("width", yl)?;
    let (center, size) = bounds(points);
    let factor = DVec2::new(xl, yl) / size;
    let mut ring = alloc_vec(points.len())?;
    ring.extend(points.iter().map(|&p| ((p - center) * factor).extend(0.0)));
    Ok(ring)
}

/// Center and size of the bounding box of `points`.
fn bounds(points: &[DVec2]) -> (DVec2, DVec2) {
    let (lo, hi) = points.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    );
    ((lo + hi) / 2.0, hi - lo)
}
