//! # Transforms
//!
//! Affine transforms composed in the fixed order
//! **Scale → Rotate → Translate**. The order cannot be changed by callers;
//! pivoted motion is expressed by translating before and after, as
//! [`crate::Polygon::extrude`] does with its start point.
//!
//! ## Example
//!
//! ```rust
//! use footprint_mesh::Transform;
//! use glam::DVec3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let t = Transform::identity()
//!     .with_rotation(DVec3::Z, FRAC_PI_2)
//!     .with_translation(DVec3::new(0.0, 0.0, 1.0));
//! let p = t.transform_point(DVec3::X);
//! assert!((p - DVec3::new(0.0, 1.0, 1.0)).length() < 1e-12);
//! ```

mod parts;
mod quat;

pub use parts::{Rotation, Scale, Translation};
pub use quat::Quat;

use glam::DVec3;

/// Scale, rotation and translation applied in that order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    scale: Scale,
    rotation: Rotation,
    translation: Translation,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Composes the three parts.
    pub fn new(scale: Scale, rotation: Rotation, translation: Translation) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    /// Builder: sets the translation.
    #[must_use]
    pub fn with_translation(mut self, offset: DVec3) -> Self {
        self.translation = Translation::from_vec(offset);
        self
    }

    /// Builder: sets the rotation to `angle` radians about `axis`.
    #[must_use]
    pub fn with_rotation(mut self, axis: DVec3, angle: f64) -> Self {
        self.rotation = Rotation::from_axis_angle(axis, angle);
        self
    }

    /// Builder: sets the scale factors.
    #[must_use]
    pub fn with_scale(mut self, factors: DVec3) -> Self {
        self.scale = Scale::from_vec(factors);
        self
    }

    pub fn set_translation(&mut self, translation: Translation) {
        self.translation = translation;
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    #[inline]
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    #[inline]
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    #[inline]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// True when every part is identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.scale.is_identity() && self.rotation.is_identity() && self.translation.is_identity()
    }

    /// Returns the transformed point.
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        let mut q = p;
        self.apply(&mut q);
        q
    }

    /// Transforms a point in place.
    pub fn apply(&self, p: &mut DVec3) {
        if self.is_identity() {
            return;
        }
        if !self.scale.is_identity() {
            *p *= self.scale.factors();
        }
        *p = self.rotation.apply(*p);
        if !self.translation.is_identity() {
            *p += self.translation.offset();
        }
    }

    /// Transforms every point in place.
    pub fn apply_all(&self, points: &mut [DVec3]) {
        if self.is_identity() {
            return;
        }
        for p in points {
            self.apply(p);
        }
    }
}
