//! # Mesh Sink
//!
//! Destination for emitted geometry. Every paint, stitch, extrude and
//! tessellation call hands one shape to a [`MeshSink`]: a vertex list, a
//! list of facets (index n-tuples) and the appearance to draw it with.
//! Text formatting of the shape belongs to the sink implementation.

use crate::error::{GeomError, GeomResult};
use glam::DVec3;

/// Appearance passed through to the sink untouched.
///
/// Only the name is interpreted, to let writers deduplicate appearance
/// definitions.
pub trait Appearance {
    fn name(&self) -> &str;
}

/// A named appearance with no further properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material {
    name: String,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Appearance for Material {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Appearance for String {
    fn name(&self) -> &str {
        self
    }
}

/// One shape handed to a sink.
pub struct ShapeData<'a> {
    /// Appearance of every facet
    pub appearance: &'a dyn Appearance,
    /// The appearance was already emitted and may be referenced by name
    pub reuse: bool,
    /// Vertex coordinates
    pub vertices: &'a [DVec3],
    /// Facets as vertex index tuples (quads, n-gons or triangles)
    pub facets: &'a [Vec<u32>],
}

/// Receiver of emitted shapes.
pub trait MeshSink {
    fn write_shape(&mut self, shape: &ShapeData<'_>) -> GeomResult<()>;
}

/// Owned copy of a [`ShapeData`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub appearance: String,
    pub reuse: bool,
    pub vertices: Vec<DVec3>,
    pub facets: Vec<Vec<u32>>,
}

impl ShapeRecord {
    /// Sum of facet areas, each facet fanned from its first vertex.
    pub fn area(&self) -> f64 {
        self.facets
            .iter()
            .map(|f| {
                let p = |i: usize| self.vertices[f[i] as usize];
                (2..f.len())
                    .map(|i| (p(i - 1) - p(0)).cross(p(i) - p(0)).length() / 2.0)
                    .sum::<f64>()
            })
            .sum()
    }
}

/// In-memory sink collecting every shape.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    shapes: Vec<ShapeRecord>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in emission order.
    #[inline]
    pub fn shapes(&self) -> &[ShapeRecord] {
        &self.shapes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of facets across all shapes.
    pub fn facet_count(&self) -> usize {
        self.shapes.iter().map(|s| s.facets.len()).sum()
    }

    /// Total facet area across all shapes.
    pub fn area(&self) -> f64 {
        self.shapes.iter().map(ShapeRecord::area).sum()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl MeshSink for MeshBuffer {
    fn write_shape(&mut self, shape: &ShapeData<'_>) -> GeomResult<()> {
        let n = shape.vertices.len();
        if let Some(bad) = shape.facets.iter().flatten().find(|&&i| i as usize >= n) {
            return Err(GeomError::invalid(format!(
                "facet index {bad} out of range for {n} vertices"
            )));
        }
        self.shapes.push(ShapeRecord {
            appearance: shape.appearance.name().to_owned(),
            reuse: shape.reuse,
            vertices: shape.vertices.to_vec(),
            facets: shape.facets.to_vec(),
        });
        Ok(())
    }
}
