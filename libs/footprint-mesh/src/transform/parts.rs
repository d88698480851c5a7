//! # Transform Parts
//!
//! Translation, rotation and scale, each caching whether it is an identity.

use super::quat::Quat;
use config::constants::{MIN_ANGLE, MIN_SCALE, MIN_TRANS, MIN_V};
use glam::{DMat3, DQuat, DVec3};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, Div, Mul, Neg, Sub};

// =============================================================================
// TRANSLATION
// =============================================================================

/// Offset added to every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    offset: DVec3,
    identity: bool,
}

impl Default for Translation {
    fn default() -> Self {
        Self::from_vec(DVec3::ZERO)
    }
}

impl Translation {
    /// Creates a translation from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_vec(DVec3::new(x, y, z))
    }

    /// Creates a translation from a vector.
    pub fn from_vec(offset: DVec3) -> Self {
        let identity = offset.abs().max_element() <= MIN_TRANS;
        Self { offset, identity }
    }

    /// Replaces the offset.
    pub fn set(&mut self, offset: DVec3) {
        *self = Self::from_vec(offset);
    }

    #[inline]
    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.identity
    }
}

impl Neg for Translation {
    type Output = Translation;
    fn neg(self) -> Translation {
        Translation::from_vec(-self.offset)
    }
}

impl Add for Translation {
    type Output = Translation;
    fn add(self, rhs: Translation) -> Translation {
        Translation::from_vec(self.offset + rhs.offset)
    }
}

impl Add<DVec3> for Translation {
    type Output = Translation;
    fn add(self, rhs: DVec3) -> Translation {
        Translation::from_vec(self.offset + rhs)
    }
}

impl Sub for Translation {
    type Output = Translation;
    fn sub(self, rhs: Translation) -> Translation {
        Translation::from_vec(self.offset - rhs.offset)
    }
}

impl Sub<DVec3> for Translation {
    type Output = Translation;
    fn sub(self, rhs: DVec3) -> Translation {
        Translation::from_vec(self.offset - rhs)
    }
}

impl Mul<f64> for Translation {
    type Output = Translation;
    fn mul(self, s: f64) -> Translation {
        Translation::from_vec(self.offset * s)
    }
}

impl Mul<Translation> for f64 {
    type Output = Translation;
    fn mul(self, t: Translation) -> Translation {
        t * self
    }
}

impl Div<f64> for Translation {
    type Output = Translation;
    fn div(self, s: f64) -> Translation {
        Translation::from_vec(self.offset / s)
    }
}

// =============================================================================
// ROTATION
// =============================================================================

/// Rotation stored as a normalized axis-angle record, its unit quaternion
/// and the derived orthonormal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    axis_angle: Quat,
    quat: DQuat,
    matrix: DMat3,
    identity: bool,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self {
            axis_angle: Quat::ZERO,
            quat: DQuat::IDENTITY,
            matrix: DMat3::IDENTITY,
            identity: true,
        }
    }

    /// Builds a rotation from an axis-angle record (`w` = angle).
    pub fn new(axis_angle: Quat) -> Self {
        let mut r = Self::identity();
        r.set(axis_angle);
        r
    }

    /// Builds a rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: DVec3, angle: f64) -> Self {
        Self::new(Quat::axis_angle(axis, angle))
    }

    /// Sets the rotation from an axis-angle record and rebuilds the
    /// quaternion and matrix.
    ///
    /// The angle is wrapped into `[-π, π)`. A near-zero axis or half-angle
    /// collapses to identity.
    pub fn set(&mut self, axis_angle: Quat) {
        if !axis_angle.w.is_finite() || !axis_angle.vector().is_finite() {
            tracing::warn!("non-finite rotation {:?} treated as identity", axis_angle);
            *self = Self::identity();
            return;
        }

        let length_squared = axis_angle.vector_length_squared();
        let mut axis = axis_angle;
        axis.vnormalize();
        let angle = (axis_angle.w + PI).rem_euclid(TAU) - PI;
        let half = angle / 2.0;
        if half * half < MIN_ANGLE || length_squared < MIN_V {
            *self = Self::identity();
            return;
        }

        self.axis_angle = Quat::axis_angle(axis.vector(), angle);
        self.quat = DQuat::from_axis_angle(axis.vector(), angle);
        self.matrix = DMat3::from_quat(self.quat);
        self.identity = false;
    }

    /// Normalized axis-angle record (`w` = angle in `[-π, π)`).
    #[inline]
    pub fn get(&self) -> Quat {
        self.axis_angle
    }

    /// Unit rotation quaternion.
    #[inline]
    pub fn quat(&self) -> DQuat {
        self.quat
    }

    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Rotates a point about the origin.
    #[inline]
    pub fn apply(&self, p: DVec3) -> DVec3 {
        if self.identity {
            p
        } else {
            self.matrix * p
        }
    }
}

// =============================================================================
// SCALE
// =============================================================================

/// Per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    factors: DVec3,
    identity: bool,
}

impl Default for Scale {
    fn default() -> Self {
        Self::from_vec(DVec3::ONE)
    }
}

impl Scale {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_vec(DVec3::new(x, y, z))
    }

    /// Same factor on every axis.
    pub fn uniform(factor: f64) -> Self {
        Self::from_vec(DVec3::splat(factor))
    }

    pub fn from_vec(factors: DVec3) -> Self {
        let identity = (factors - DVec3::ONE).abs().max_element() <= MIN_SCALE;
        Self { factors, identity }
    }

    pub fn set(&mut self, factors: DVec3) {
        *self = Self::from_vec(factors);
    }

    #[inline]
    pub fn factors(&self) -> DVec3 {
        self.factors
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.identity
    }
}
