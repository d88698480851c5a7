//! Shared recorder for callback output.

use crate::callbacks::{Primitive, TessCallbacks};
use crate::error::TessError;

/// Collects every primitive and minted vertex.
#[derive(Debug, Default)]
pub struct Recorder {
    pub primitives: Vec<(Primitive, Vec<usize>)>,
    pub combined: Vec<[f64; 2]>,
    pub errors: Vec<TessError>,
    pub next_id: usize,
}

impl Recorder {
    pub fn starting_at(next_id: usize) -> Self {
        Self {
            next_id,
            ..Self::default()
        }
    }

    /// Flattens fans and lists into triangles.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut out = Vec::new();
        for (primitive, ids) in &self.primitives {
            match primitive {
                Primitive::TriangleFan => {
                    for i in 2..ids.len() {
                        out.push([ids[0], ids[i - 1], ids[i]]);
                    }
                }
                Primitive::Triangles => {
                    out.extend(ids.chunks_exact(3).map(|t| [t[0], t[1], t[2]]));
                }
                _ => {}
            }
        }
        out
    }

    pub fn loops(&self) -> Vec<Vec<usize>> {
        self.primitives
            .iter()
            .filter(|(p, _)| *p == Primitive::LineLoop)
            .map(|(_, ids)| ids.clone())
            .collect()
    }
}

impl TessCallbacks for Recorder {
    fn begin(&mut self, primitive: Primitive) {
        self.primitives.push((primitive, Vec::new()));
    }

    fn vertex(&mut self, id: usize) {
        if let Some((_, ids)) = self.primitives.last_mut() {
            ids.push(id);
        }
    }

    fn end(&mut self) {}

    fn combine(&mut self, coords: [f64; 2], _sources: [Option<usize>; 4], _weights: [f64; 4]) -> usize {
        self.combined.push(coords);
        self.next_id += 1;
        self.next_id - 1
    }

    fn error(&mut self, error: &TessError) {
        self.errors.push(error.clone());
    }
}
