//! # Tessellation Callbacks
//!
//! Output of [`crate::Tessellator::end_polygon`] is pushed into a caller
//! context through this trait. The context is borrowed mutably for the
//! duration of the call, so it can accumulate whatever state it needs.

use crate::error::TessError;

/// Primitive kind announced by [`TessCallbacks::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Closed boundary loop (boundary-only mode)
    LineLoop,
    /// Fan around the first vertex
    TriangleFan,
    /// Strip of alternating triangles
    TriangleStrip,
    /// Independent triangles, three vertices each
    Triangles,
}

/// Receiver of tessellation output.
pub trait TessCallbacks {
    /// Starts a primitive.
    fn begin(&mut self, primitive: Primitive);

    /// Adds a vertex, by caller id, to the current primitive.
    fn vertex(&mut self, id: usize);

    /// Ends the current primitive.
    fn end(&mut self);

    /// Mints an id for a vertex created at an edge intersection.
    ///
    /// `sources` are the endpoints of the two crossing edges and `weights`
    /// their interpolation weights (summing to 1).
    fn combine(&mut self, coords: [f64; 2], sources: [Option<usize>; 4], weights: [f64; 4]) -> usize;

    /// Reports a fault. The same error is also returned from `end_polygon`.
    fn error(&mut self, error: &TessError);
}
