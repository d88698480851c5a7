//! # Footprint Mesh
//!
//! Geometry core for parameterized electronic-component models.
//! Builds vertex rings, lofts and caps them, triangulates outlines with
//! holes and sweeps profiles along bent wire paths. Everything is emitted
//! as vertex and facet-index lists through a [`MeshSink`].
//!
//! ## Architecture
//!
//! ```text
//! transform (Quat, Rotation, Translation, Scale)
//!     ├── polygon (calc / paint / stitch / extrude / xform)
//!     │       ├── sweep (Wire: straight runs + arc bends)
//!     │       ├── funnel (tapered entry lofted into a stem)
//!     │       └── hole (rectangular frame around an opening)
//!     └── tess (contours → triangles, via polygon-tess)
//!                         ↓
//!                    MeshSink (vertices + facets)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use footprint_mesh::{Material, MeshBuffer, Polygon, Transform};
//!
//! let mut pad = Polygon::rectangle(0.0);
//! pad.calc(1.2, 0.8, &Transform::identity()).unwrap();
//!
//! let mut out = MeshBuffer::new();
//! pad.paint(true, &Transform::identity(), &Material::new("copper"), false, &mut out).unwrap();
//! assert_eq!(out.shapes()[0].facets, vec![vec![0, 1, 2, 3]]);
//! ```

pub mod error;
pub mod funnel;
pub mod hole;
pub mod polygon;
pub mod sink;
pub mod sweep;
pub mod tess;
pub mod transform;

pub use error::{ErrorKind, GeomError, GeomResult};
pub use funnel::{Funnel, FunnelShape};
pub use hole::{Hole, HoleShape};
pub use polygon::{Polygon, PolygonKind, PolygonView};
pub use sink::{Appearance, Material, MeshBuffer, MeshSink, ShapeData, ShapeRecord};
pub use sweep::{SweepSummary, Wire};
pub use tess::{ContourId, Tessellator};
pub use transform::{Quat, Rotation, Scale, Transform, Translation};
