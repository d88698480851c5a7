//! # Ring Emission
//!
//! Paint and stitch over borrowed vertex rings. [`super::Polygon`]
//! delegates here once it has checked that its ring was calculated.

use crate::error::{alloc_vec, GeomError, GeomResult};
use crate::sink::{Appearance, MeshSink, ShapeData};
use crate::transform::Transform;
use glam::DVec3;

/// Borrowed vertex ring, for emitting facets over caller-owned vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonView<'a> {
    vertices: &'a [DVec3],
}

impl<'a> PolygonView<'a> {
    /// Wraps a ring. Fails when it has fewer than three vertices.
    pub fn new(vertices: &'a [DVec3]) -> GeomResult<Self> {
        if vertices.len() < 3 {
            return Err(GeomError::degenerate(format!(
                "ring has {} vertices (min: 3)",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &'a [DVec3] {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Emits the ring as one n-gon. CCW lists vertices `0..n`, CW lists
    /// them `n-1..=0`.
    pub fn paint(
        &self,
        is_ccw: bool,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        let n = index(self.len())?;
        let mut vertices = alloc_vec(self.vertices.len())?;
        vertices.extend_from_slice(self.vertices);
        transform.apply_all(&mut vertices);

        let facet: Vec<u32> = if is_ccw { (0..n).collect() } else { (0..n).rev().collect() };
        sink.write_shape(&ShapeData {
            appearance,
            reuse,
            vertices: &vertices,
            facets: &[facet],
        })
    }

    /// Lofts this ring to `other` with one quad per vertex.
    ///
    /// Quads are `(i, j, j+n, i+n)` with `j = i+1` (CCW) or `j = i-1` (CW),
    /// wrapping, over the buffer `self ++ other`.
    pub fn stitch(
        &self,
        is_ccw: bool,
        other: &PolygonView<'_>,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        let len = self.len();
        if other.len() != len {
            return Err(GeomError::degenerate(format!(
                "points in second ring ({}) do not match points in this ring ({len})",
                other.len()
            )));
        }
        let n = index(len)?;
        index(2 * len)?;

        let mut vertices = alloc_vec(2 * len)?;
        vertices.extend_from_slice(self.vertices);
        vertices.extend_from_slice(other.vertices);
        transform.apply_all(&mut vertices);

        let mut facets = alloc_vec(len)?;
        for i in 0..n {
            let j = if is_ccw { (i + 1) % n } else { (i + n - 1) % n };
            facets.push(vec![i, j, j + n, i + n]);
        }
        sink.write_shape(&ShapeData {
            appearance,
            reuse,
            vertices: &vertices,
            facets: &facets,
        })
    }
}

fn index(len: usize) -> GeomResult<u32> {
    u32::try_from(len).map_err(|_| GeomError::invalid(format!("{len} vertices exceed the index range")))
}
