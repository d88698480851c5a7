//! # Tessellator
//!
//! Sequencing front end for contour input. Contours are buffered between
//! `begin_polygon` and `end_polygon`; all output is produced by
//! `end_polygon`.

use crate::boundary::{self, Vertex};
use crate::callbacks::{Primitive, TessCallbacks};
use crate::error::TessError;
use crate::triangulate;
use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Polygon,
    Contour,
}

/// Contour tessellator using the positive winding rule about `+Z`.
#[derive(Debug, Clone)]
pub struct Tessellator {
    boundary_only: bool,
    phase: Phase,
    contours: Vec<Vec<Vertex>>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    /// Creates a tessellator in full triangulation mode.
    pub fn new() -> Self {
        Self {
            boundary_only: false,
            phase: Phase::Idle,
            contours: Vec::new(),
        }
    }

    /// Switches between boundary loops and triangle output.
    pub fn set_boundary_only(&mut self, boundary_only: bool) {
        self.boundary_only = boundary_only;
    }

    /// Returns true when only boundary loops are produced.
    #[inline]
    pub fn boundary_only(&self) -> bool {
        self.boundary_only
    }

    /// Starts a new polygon, discarding any buffered contours.
    pub fn begin_polygon(&mut self) -> Result<(), TessError> {
        self.expect_phase(Phase::Idle, "begin_polygon")?;
        self.contours.clear();
        self.phase = Phase::Polygon;
        Ok(())
    }

    /// Opens a contour inside the current polygon.
    pub fn begin_contour(&mut self) -> Result<(), TessError> {
        self.expect_phase(Phase::Polygon, "begin_contour")?;
        self.contours.push(Vec::new());
        self.phase = Phase::Contour;
        Ok(())
    }

    /// Appends a vertex to the open contour.
    pub fn vertex(&mut self, coords: [f64; 2], id: usize) -> Result<(), TessError> {
        self.expect_phase(Phase::Contour, "vertex")?;
        if !coords.iter().all(|c| c.is_finite()) {
            return Err(TessError::NonFinite { id });
        }
        if let Some(contour) = self.contours.last_mut() {
            contour.push(Vertex {
                pos: DVec2::from(coords),
                id,
            });
        }
        Ok(())
    }

    /// Closes the open contour. Contours of fewer than three vertices are
    /// discarded and reported.
    pub fn end_contour(&mut self) -> Result<(), TessError> {
        self.expect_phase(Phase::Contour, "end_contour")?;
        self.phase = Phase::Polygon;
        let index = self.contours.len().saturating_sub(1);
        let count = self.contours.last().map_or(0, Vec::len);
        if count < 3 {
            self.contours.pop();
            return Err(TessError::ContourTooSmall {
                contour: index,
                count,
            });
        }
        Ok(())
    }

    /// Tessellates the buffered contours, delivering output to `callbacks`.
    ///
    /// Faults are reported through [`TessCallbacks::error`] and returned.
    /// The tessellator is idle afterwards either way.
    pub fn end_polygon<C>(&mut self, callbacks: &mut C) -> Result<(), TessError>
    where
        C: TessCallbacks + ?Sized,
    {
        let result = self
            .expect_phase(Phase::Polygon, "end_polygon")
            .and_then(|()| self.run(callbacks));
        self.phase = Phase::Idle;
        self.contours.clear();
        if let Err(error) = &result {
            tracing::warn!("tessellation failed: {}", error);
            callbacks.error(error);
        }
        result
    }

    fn run<C>(&self, callbacks: &mut C) -> Result<(), TessError>
    where
        C: TessCallbacks + ?Sized,
    {
        let boundary = boundary::resolve(&self.contours, callbacks)?;
        if self.boundary_only {
            for i in 0..boundary.loops.len() {
                callbacks.begin(Primitive::LineLoop);
                for id in boundary.ids(i) {
                    callbacks.vertex(id);
                }
                callbacks.end();
            }
            return Ok(());
        }
        let triangles = triangulate::triangulate(&boundary, callbacks)?;
        tracing::debug!("tessellated {} loops into {} triangles", boundary.loops.len(), triangles);
        Ok(())
    }

    fn expect_phase(&self, phase: Phase, call: &'static str) -> Result<(), TessError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TessError::OutOfSequence { call })
        }
    }
}
