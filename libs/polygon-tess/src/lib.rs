//! # Polygon Tess
//!
//! Push-style tessellation of planar contours.
//!
//! ## Architecture
//!
//! ```text
//! begin_polygon → (begin_contour → vertex* → end_contour)* → end_polygon(callbacks)
//!                                                                 │
//!                      boundary loops (positive winding, +Z) ◄────┤
//!                      triangles (fan or list, CCW)          ◄────┘
//! ```
//!
//! Every vertex is tagged with a caller id. Output refers back to those ids,
//! plus ids minted by [`TessCallbacks::combine`] for intersection points.
//!
//! ## Usage
//!
//! ```rust
//! use polygon_tess::{Primitive, TessCallbacks, TessError, Tessellator};
//!
//! #[derive(Default)]
//! struct Collect {
//!     ids: Vec<usize>,
//! }
//!
//! impl TessCallbacks for Collect {
//!     fn begin(&mut self, _primitive: Primitive) {}
//!     fn vertex(&mut self, id: usize) {
//!         self.ids.push(id);
//!     }
//!     fn end(&mut self) {}
//!     fn combine(&mut self, _coords: [f64; 2], _sources: [Option<usize>; 4], _weights: [f64; 4]) -> usize {
//!         usize::MAX
//!     }
//!     fn error(&mut self, _error: &TessError) {}
//! }
//!
//! let mut tess = Tessellator::new();
//! tess.begin_polygon().unwrap();
//! tess.begin_contour().unwrap();
//! for (id, p) in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]].into_iter().enumerate() {
//!     tess.vertex(p, id).unwrap();
//! }
//! tess.end_contour().unwrap();
//! let mut out = Collect::default();
//! tess.end_polygon(&mut out).unwrap();
//! assert_eq!(out.ids.len(), 3);
//! ```

pub mod boundary;
pub mod callbacks;
pub mod error;
pub mod tessellator;
pub mod triangulate;

pub use callbacks::{Primitive, TessCallbacks};
pub use error::TessError;
pub use tessellator::Tessellator;

use glam::DVec2;

/// Signed orientation of `c` relative to the directed line `a → b`.
///
/// Positive when the three points turn counter-clockwise.
#[inline]
pub(crate) fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(
        robust::Coord { x: a.x, y: a.y },
        robust::Coord { x: b.x, y: b.y },
        robust::Coord { x: c.x, y: c.y },
    )
}

/// Twice the signed area of a ring; positive for counter-clockwise rings.
pub(crate) fn signed_area2(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

#[cfg(test)]
pub(crate) mod test_support;
