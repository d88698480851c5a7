//! # Framed Hole
//!
//! A flat rectangular frame with a rectangular or elliptical opening, such
//! as the top of a socket housing or a board cutout. The face is emitted as
//! one shape over the frame corners followed by the opening ring; walls are
//! left to the caller, who can extrude [`Hole::frame`] and [`Hole::opening`].
//!
//! ## Facets
//!
//! Frame corner `c` runs `(+,-)`, `(+,+)`, `(-,+)`, `(-,-)`. A rectangular
//! opening gives one quad per side. An elliptical opening is split into
//! quarter arcs; each corner fans over the arc facing it, and a triangle
//! joins the corner, the next corner and the end of that arc.

use crate::error::{alloc_vec, GeomError, GeomResult};
use crate::polygon::Polygon;
use crate::sink::{Appearance, MeshSink, ShapeData};
use crate::transform::Transform;
use config::constants::MAX_SEGMENTS;
use glam::DVec2;

/// Opening of a [`Hole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleShape {
    Rectangle,
    /// Ellipse with a multiple of 4 vertices
    Ellipse { segments: u32 },
}

/// Rectangular frame around an offset opening.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    shape: HoleShape,
    frame: Polygon,
    opening: Polygon,
}

impl Hole {
    pub fn rectangle() -> Self {
        Self {
            shape: HoleShape::Rectangle,
            frame: Polygon::rectangle(0.0),
            opening: Polygon::rectangle(0.0),
        }
    }

    /// Elliptical opening; `segments` must be a multiple of 4 in `4..=360`.
    pub fn ellipse(segments: u32) -> GeomResult<Self> {
        if segments % 4 != 0 || !(4..=MAX_SEGMENTS).contains(&segments) {
            return Err(GeomError::invalid(format!(
                "segments must be a multiple of 4 in 4..={MAX_SEGMENTS}: {segments}"
            )));
        }
        Ok(Self {
            shape: HoleShape::Ellipse { segments },
            frame: Polygon::rectangle(0.0),
            opening: Polygon::ellipse(segments)?,
        })
    }

    #[inline]
    pub fn shape(&self) -> HoleShape {
        self.shape
    }

    /// Outer rectangle, CCW from the `(+,-)` corner.
    #[inline]
    pub fn frame(&self) -> &Polygon {
        &self.frame
    }

    /// Opening ring, CCW.
    #[inline]
    pub fn opening(&self) -> &Polygon {
        &self.opening
    }

    /// Builds the frame (`frame` extents) and the opening (`size`
    /// extents, centered on `offset`), then applies `transform`.
    ///
    /// The opening must stay strictly inside the frame on both axes.
    pub fn calc(&mut self, frame: DVec2, size: DVec2, offset: DVec2, transform: &Transform) -> GeomResult<()> {
        self.frame = Polygon::rectangle(0.0);
        self.opening = blank(self.shape)?;
        check_fit("x", frame.x, size.x, offset.x)?;
        check_fit("y", frame.y, size.y, offset.y)?;

        let placed = Transform::identity().with_translation(offset.extend(0.0));
        self.frame.calc(frame.x, frame.y, transform)?;
        self.opening.calc(size.x, size.y, &placed)?;
        self.opening.xform(transform)
    }

    /// Emits the face, seen from `+Z` when `top` and from `-Z` otherwise.
    pub fn build(
        &self,
        top: bool,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        let frame = self.frame.view()?;
        let opening = self.opening.view()?;
        let n = u32::try_from(opening.len())
            .map_err(|_| GeomError::invalid(format!("{} vertices exceed the index range", opening.len())))?;

        let mut vertices = alloc_vec(frame.len() + opening.len())?;
        vertices.extend_from_slice(frame.vertices());
        vertices.extend_from_slice(opening.vertices());
        transform.apply_all(&mut vertices);

        let facets = match self.shape {
            HoleShape::Rectangle => rectangle_facets(top),
            HoleShape::Ellipse { .. } => ellipse_facets(top, n)?,
        };
        sink.write_shape(&ShapeData {
            appearance,
            reuse,
            vertices: &vertices,
            facets: &facets,
        })
    }
}

fn blank(shape: HoleShape) -> GeomResult<Polygon> {
    match shape {
        HoleShape::Rectangle => Ok(Polygon::rectangle(0.0)),
        HoleShape::Ellipse { segments } => Polygon::ellipse(segments),
    }
}

fn check_fit(axis: &str, frame: f64, size: f64, offset: f64) -> GeomResult<()> {
    if !(frame.is_finite() && size.is_finite() && offset.is_finite()) {
        return Err(GeomError::invalid(format!("non-finite hole size on {axis}")));
    }
    if size <= 0.0 || size >= frame {
        return Err(GeomError::invalid(format!(
            "opening ({size}) must be in (0, {frame}) on {axis}"
        )));
    }
    if size / 2.0 + offset.abs() >= frame / 2.0 {
        return Err(GeomError::invalid(format!(
            "opening ({size} at {offset}) reaches the frame edge on {axis}"
        )));
    }
    Ok(())
}

// =============================================================================
// FACETS
// =============================================================================

/// Opening vertices follow the four frame corners in the vertex list.
const FIRST_OPENING: u32 = 4;

fn rectangle_facets(top: bool) -> Vec<Vec<u32>> {
    (0..4)
        .map(|c| {
            let d = (c + 1) % 4;
            let (hc, hd) = (FIRST_OPENING + c, FIRST_OPENING + d);
            if top {
                vec![c, d, hd, hc]
            } else {
                vec![d, c, hc, hd]
            }
        })
        .collect()
}

fn ellipse_facets(top: bool, n: u32) -> GeomResult<Vec<Vec<u32>>> {
    let quarter = n / 4;
    let mut facets = alloc_vec(n as usize + 4)?;
    let at = |k: u32| FIRST_OPENING + k % n;
    for c in 0..4 {
        let d = (c + 1) % 4;
        // Arc facing corner c starts a quarter turn behind it.
        let start = ((c + 3) % 4) * quarter;
        for k in start..start + quarter {
            let (a, b) = (at(k), at(k + 1));
            facets.push(if top { vec![a, c, b] } else { vec![c, a, b] });
        }
        let end = at(start + quarter);
        facets.push(if top { vec![c, d, end] } else { vec![d, c, end] });
    }
    Ok(facets)
}
