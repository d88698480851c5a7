//! # Path Sweep
//!
//! Sweeps a cross-section profile along a poly-line, rounding every
//! interior corner with a circular bend. Used for bent component leads and
//! wire jumpers.
//!
//! ## Bend geometry
//!
//! For a turn of `θ` at waypoint `p2` with bend radius `r`:
//!
//! ```text
//! tangent = r · tan(θ/2)                   straight length consumed per side
//! center  = p2 + √(tangent² + r²) · n̂      n̂ = normalize(dir_out − dir_in)
//! arc     = r · θ                          added to the running length
//! facets  = max(2, ⌊θ · density + 0.1⌋)    density = segments per radian
//! ```
//!
//! Each facet is its own extrusion: the profile is rotated about `center`
//! by `θ / facets` around the bend normal `dir_in × dir_out`.

use crate::error::{GeomError, GeomResult};
use crate::polygon::Polygon;
use crate::sink::{Appearance, MeshSink};
use crate::transform::{Quat, Rotation, Scale, Transform, Translation};
use config::constants::{SweepConfig, COLLINEAR_EPSILON, MIN_TRANS, MIN_V};
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Lengths reported by [`Wire::build`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepSummary {
    /// Arc length of the swept centerline
    pub length: f64,
    /// Running length after each emitted section
    pub stations: Vec<f64>,
}

/// Poly-line path with bend parameters.
#[derive(Debug, Clone, Default)]
pub struct Wire {
    path: Vec<DVec3>,
    config: SweepConfig,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire using already validated bend parameters.
    pub fn with_config(config: SweepConfig) -> Self {
        Self {
            path: Vec::new(),
            config,
        }
    }

    /// Sets arc facets per 90 degrees and the bend radius.
    pub fn set_params(&mut self, segments_per_90: u32, bend_radius: f64) -> GeomResult<()> {
        self.config = SweepConfig::new(segments_per_90, bend_radius)?;
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Appends a waypoint.
    pub fn add_point(&mut self, point: DVec3) -> GeomResult<()> {
        if !point.is_finite() {
            return Err(GeomError::invalid(format!("non-finite waypoint {point}")));
        }
        self.path.try_reserve(1)?;
        self.path.push(point);
        Ok(())
    }

    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.path
    }

    /// Removes all waypoints, keeping the bend parameters.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Sweeps `profile` along the path.
    ///
    /// The profile is taken as lying in the XY plane facing `+Z`; it is
    /// turned to face the first segment and moved to the first waypoint.
    /// `cap0` and `cap1` close the start and end, `outside` selects the
    /// winding of the lofted walls, and `transform` applies to the output
    /// only.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        profile: &Polygon,
        cap0: bool,
        cap1: bool,
        outside: bool,
        transform: &Transform,
        appearance: &dyn Appearance,
        reuse: bool,
        sink: &mut dyn MeshSink,
    ) -> GeomResult<SweepSummary> {
        profile.view()?;
        self.check_path()?;

        let p0 = self.path[0];
        let mut shape = profile.clone();
        shape.xform(&Transform::new(
            Scale::default(),
            face_direction(self.path[1] - p0),
            Translation::from_vec(p0),
        ))?;

        let mut run = Run {
            shape,
            start: p0,
            cap0,
            outside,
            reuse,
            transform,
            appearance,
            sink,
            length: 0.0,
            stations: Vec::new(),
        };

        for i in 1..self.path.len() - 1 {
            let (p1, p2, p3) = (self.path[i - 1], self.path[i], self.path[i + 1]);
            self.bend(&mut run, i, p1, p2, p3)?;
        }
        let last = self.path[self.path.len() - 1];
        run.straight(last, cap1)?;

        tracing::debug!(
            "swept {} waypoints into {} sections, length {:.4}",
            self.path.len(),
            run.stations.len(),
            run.length
        );
        Ok(SweepSummary {
            length: run.length,
            stations: run.stations,
        })
    }

    fn check_path(&self) -> GeomResult<()> {
        if self.path.len() < 2 {
            return Err(GeomError::invalid(format!(
                "wire path has {} points (min: 2)",
                self.path.len()
            )));
        }
        if let Some(i) = self
            .path
            .windows(2)
            .position(|w| (w[1] - w[0]).length_squared() < MIN_V)
        {
            return Err(GeomError::invalid(format!("zero-length path segment after point {i}")));
        }
        Ok(())
    }

    /// Runs straight up to the bend at `p2`, then around it.
    fn bend(&self, run: &mut Run<'_>, index: usize, p1: DVec3, p2: DVec3, p3: DVec3) -> GeomResult<()> {
        let (v1, v2) = (p2 - p1, p3 - p2);
        let (n1, n2) = (v1.normalize(), v2.normalize());
        let turn = Quat::from_vector(n1).cross(Quat::from_vector(n2));

        if turn.vector().length() < COLLINEAR_EPSILON {
            if n1.dot(n2) > 0.0 {
                return run.straight(p2, false);
            }
            tracing::warn!("wire reverses direction at point {}", index);
            return Err(GeomError::degenerate(format!(
                "path reverses direction at point {index}"
            )));
        }

        let radius = self.config.bend_radius;
        let theta = turn.w;
        let tangent = radius * (theta / 2.0).tan();
        let remaining = (p2 - run.start).length();
        if v1.length() < tangent || v2.length() < tangent || remaining + MIN_TRANS < tangent {
            tracing::warn!(
                "bend at point {} needs {:.4} of straight path on each side",
                index,
                tangent
            );
            return Err(GeomError::degenerate("path segment too short for bend"));
        }

        run.straight(p2 - n1 * tangent, false)?;

        let center = p2 + (n2 - n1).normalize() * (tangent * tangent + radius * radius).sqrt();
        let facets = ((theta * self.config.segments_per_radian() + 0.1) as u32).max(2);
        let step = theta / f64::from(facets);
        let sweep = Transform::identity().with_rotation(turn.vector(), step);
        for _ in 0..facets {
            run.emit(center, &sweep, false, radius * step)?;
        }
        run.start = p2 + n2 * tangent;

        tracing::debug!(
            "bend at point {}: {:.2} deg in {} facets",
            index,
            theta.to_degrees(),
            facets
        );
        Ok(())
    }
}

/// Rotation turning `+Z` onto `dir`; a half turn about `+Y` when they
/// are opposite.
fn face_direction(dir: DVec3) -> Rotation {
    let orient = Quat::from_vector(DVec3::Z).cross(Quat::from_vector(dir));
    if orient.vector().length() < COLLINEAR_EPSILON * dir.length() {
        if orient.w > FRAC_PI_2 {
            return Rotation::from_axis_angle(DVec3::Y, PI);
        }
        return Rotation::identity();
    }
    Rotation::new(orient)
}

/// Sweep in progress.
struct Run<'a> {
    shape: Polygon,
    start: DVec3,
    cap0: bool,
    outside: bool,
    reuse: bool,
    transform: &'a Transform,
    appearance: &'a dyn Appearance,
    sink: &'a mut dyn MeshSink,
    length: f64,
    stations: Vec<f64>,
}

impl Run<'_> {
    /// Extrudes the current shape about `pivot` and advances the length.
    fn emit(&mut self, pivot: DVec3, sweep: &Transform, cap1: bool, advance: f64) -> GeomResult<()> {
        self.shape = self.shape.extrude(
            self.cap0,
            cap1,
            self.outside,
            pivot,
            sweep,
            self.transform,
            self.appearance,
            self.reuse,
            &mut *self.sink,
        )?;
        self.cap0 = false;
        self.reuse = true;
        self.length += advance;
        self.stations.push(self.length);
        Ok(())
    }

    /// Extrudes straight from the current start to `to`.
    fn straight(&mut self, to: DVec3, cap1: bool) -> GeomResult<()> {
        let offset = to - self.start;
        let length = offset.length();
        if length <= MIN_TRANS {
            if cap1 {
                self.shape
                    .paint(self.outside, self.transform, self.appearance, self.reuse, &mut *self.sink)?;
                self.reuse = true;
            }
            return Ok(());
        }
        let sweep = Transform::identity().with_translation(offset);
        let pivot = self.start;
        self.emit(pivot, &sweep, cap1, length)?;
        self.start = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
