//! # Tessellation Errors

use thiserror::Error;

/// Faults reported by the tessellation primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TessError {
    /// A call arrived in a state that does not accept it
    #[error("{call} called out of sequence")]
    OutOfSequence { call: &'static str },

    /// A contour closed with too few vertices to bound an area
    #[error("contour {contour} has {count} vertices (min: 3)")]
    ContourTooSmall { contour: usize, count: usize },

    /// A coordinate was NaN or infinite
    #[error("non-finite coordinate for vertex {id}")]
    NonFinite { id: usize },

    /// Boundary edges could not be linked into closed loops
    #[error("open boundary at vertex {id}")]
    OpenBoundary { id: usize },

    /// The ear clipper rejected a loop
    #[error("triangulation failed: {message}")]
    TriangulationFailed { message: String },
}

impl TessError {
    /// Creates a triangulation failure error.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::TriangulationFailed {
            message: message.into(),
        }
    }
}
