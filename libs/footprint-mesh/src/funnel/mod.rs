//! # Funnel
//!
//! A tapered entry lofted into a straight stem, as found on plated
//! through-holes and press-fit sockets. The surface is open at the top and
//! faces inward, so it is seen from inside the cavity.
//!
//! ## Rings
//!
//! ```text
//! z = 0                 top      (w1 × d1)
//! z = -h1               flute    (w2 × d2)
//! z = -(h1 + h2)        neck     (w2 × d2, only when h2 > 0)
//! z = -(h1 + h2 + h3)   bottom   (w2 × d2)
//! ```
//!
//! The flute and the neck share one appearance; the stem below them takes
//! another.

use crate::error::{GeomError, GeomResult};
use crate::polygon::Polygon;
use crate::sink::{Appearance, MeshSink};
use crate::transform::Transform;
use glam::{DVec2, DVec3};

/// Cross-section of a [`Funnel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FunnelShape {
    /// Rectangular section, corners clipped by `bevel` when positive
    Square { bevel: f64 },
    /// Elliptical section with `segments` vertices
    Round { segments: u32 },
}

/// Stack of rings lofted into a funnel.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::{Funnel, Material, MeshBuffer, Transform};
/// use glam::DVec2;
///
/// let mut funnel = Funnel::round(16).unwrap();
/// funnel
///     .calc(DVec2::splat(1.6), DVec2::splat(1.0), 0.3, 0.0, 1.2, &Transform::identity())
///     .unwrap();
///
/// let (copper, hole) = (Material::new("copper"), Material::new("hole"));
/// let mut out = MeshBuffer::new();
/// funnel
///     .build(true, &Transform::identity(), &copper, false, &hole, false, &mut out)
///     .unwrap();
/// assert_eq!(out.shapes().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Funnel {
    shape: FunnelShape,
    rings: Vec<Polygon>,
}

impl Funnel {
    /// Rectangular funnel with corner bevel (0 for sharp corners).
    pub fn square(bevel: f64) -> Self {
        Self {
            shape: FunnelShape::Square { bevel },
            rings: Vec::new(),
        }
    }

    /// Elliptical funnel with `segments` vertices per ring.
    pub fn round(segments: u32) -> GeomResult<Self> {
        Polygon::ellipse(segments)?;
        Ok(Self {
            shape: FunnelShape::Round { segments },
            rings: Vec::new(),
        })
    }

    #[inline]
    pub fn shape(&self) -> FunnelShape {
        self.shape
    }

    /// Calculated rings from the top down; empty before `calc`.
    #[inline]
    pub fn rings(&self) -> &[Polygon] {
        &self.rings
    }

    /// Builds the rings, then applies `transform` to them.
    ///
    /// `top` and `stem` are the X/Y extents of the opening and the stem,
    /// the opening being strictly larger on both axes. `flute_depth` must
    /// be `>= 0`, `stem_depth` `> 0`; a `neck_depth <= 0` adds no neck.
    pub fn calc(
        &mut self,
        top: DVec2,
        stem: DVec2,
        flute_depth: f64,
        neck_depth: f64,
        stem_depth: f64,
        transform: &Transform,
    ) -> GeomResult<()> {
        self.rings.clear();
        check_sizes(top, stem)?;
        if !flute_depth.is_finite() || flute_depth < 0.0 {
            return Err(GeomError::invalid(format!("flute depth ({flute_depth}) must be >= 0")));
        }
        if !stem_depth.is_finite() || stem_depth <= 0.0 {
            return Err(GeomError::invalid(format!("stem depth ({stem_depth}) must be > 0")));
        }
        if neck_depth.is_nan() {
            return Err(GeomError::invalid("neck depth is not a number"));
        }

        let mut levels = vec![(top, 0.0), (stem, -flute_depth)];
        let mut bottom = flute_depth;
        if neck_depth > 0.0 {
            bottom += neck_depth;
            levels.push((stem, -bottom));
        }
        bottom += stem_depth;
        levels.push((stem, -bottom));

        let mut rings = Vec::new();
        rings.try_reserve(levels.len())?;
        for (size, z) in levels {
            let mut ring = self.blank()?;
            let level = Transform::identity().with_translation(DVec3::new(0.0, 0.0, z));
            ring.calc(size.x, size.y, &level)?;
            ring.xform(transform)?;
            rings.push(ring);
        }
        self.rings = rings;
        Ok(())
    }

    fn blank(&self) -> GeomResult<Polygon> {
        match self.shape {
            FunnelShape::Square { bevel } => Ok(Polygon::rectangle(bevel)),
            FunnelShape::Round { segments } => Polygon::ellipse(segments),
        }
    }

    /// Emits the flute, neck and stem walls, plus the stem floor when `cap`.
    ///
    /// The stem reuses its appearance when `reuse_stem` is set or when it
    /// has the same name as the flute's.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        cap: bool,
        transform: &Transform,
        flute: &dyn Appearance,
        reuse_flute: bool,
        stem: &dyn Appearance,
        reuse_stem: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<()> {
        if self.rings.len() < 3 {
            return Err(GeomError::degenerate("invoked without prior invocation of calc"));
        }
        let last = self.rings.len() - 1;
        let reuse_stem = reuse_stem || flute.name() == stem.name();

        for (i, pair) in self.rings.windows(2).enumerate() {
            let (appearance, reuse) = match i {
                _ if i + 1 == last => (stem, reuse_stem),
                0 => (flute, reuse_flute),
                _ => (flute, true),
            };
            pair[0].stitch(true, &pair[1], transform, appearance, reuse, sink)?;
        }
        if cap {
            self.rings[last].paint(true, transform, stem, true, sink)?;
        }
        tracing::debug!("funnel: {} rings, cap {}", self.rings.len(), cap);
        Ok(())
    }
}

fn check_sizes(top: DVec2, stem: DVec2) -> GeomResult<()> {
    if !top.is_finite() || !stem.is_finite() {
        return Err(GeomError::invalid("non-finite funnel size"));
    }
    if stem.min_element() <= 0.0 {
        return Err(GeomError::invalid(format!("stem size {stem} must be positive")));
    }
    if top.x <= stem.x || top.y <= stem.y {
        return Err(GeomError::invalid(format!(
            "opening {top} must be larger than the stem {stem} on both axes"
        )));
    }
    Ok(())
}
