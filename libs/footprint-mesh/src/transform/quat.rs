//! # Axis-Angle Record
//!
//! Four-component carrier for rotations as `(w = θ, xyz = axis)`. The
//! rotation operator itself is a [`glam::DQuat`] built by
//! [`super::Rotation`]; the xyz part converts freely to and from [`DVec3`].

use crate::error::{GeomError, GeomResult};
use config::constants::{MIN_V, MIN_W};
use glam::DVec3;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Four components `(w, x, y, z)`; an axis-angle record or, with `w = 0`,
/// a plain vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Quat {
    /// Zero angle about no axis.
    pub const ZERO: Quat = Quat::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a quaternion from its components.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Wraps a vector with `w = 0`.
    pub fn from_vector(v: DVec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Axis-angle record: `w` carries the angle in radians.
    pub fn axis_angle(axis: DVec3, angle: f64) -> Self {
        Self::new(angle, axis.x, axis.y, axis.z)
    }

    /// The xyz part.
    #[inline]
    pub fn vector(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Squared magnitude of the xyz part.
    #[inline]
    pub fn vector_length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Normalizes all four components to unit length.
    ///
    /// Fails when `|w|` is below `MIN_W`, leaving the value untouched.
    pub fn normalize(&mut self) -> GeomResult<()> {
        if self.w * self.w < MIN_W * MIN_W {
            return Err(GeomError::invalid(format!(
                "quaternion w ({}) is below the limit {MIN_W}",
                self.w
            )));
        }
        let n = (self.w * self.w + self.vector_length_squared()).sqrt();
        *self = *self / n;
        Ok(())
    }

    /// Normalizes the xyz part in place.
    ///
    /// A vector with squared magnitude below `MIN_V` is zeroed and `false`
    /// is returned.
    pub fn vnormalize(&mut self) -> bool {
        let n = self.vector_length_squared();
        if n < MIN_V {
            self.x = 0.0;
            self.y = 0.0;
            self.z = 0.0;
            return false;
        }
        let n = n.sqrt();
        self.x /= n;
        self.y /= n;
        self.z /= n;
        true
    }

    /// Cross product of the xyz parts; `w` of the result holds the angle
    /// between the two vectors in `[0, π]`, so the result is directly an
    /// axis-angle record rotating `self` onto `rhs`.
    pub fn cross(self, rhs: Quat) -> Quat {
        let (a, b) = (self.vector(), rhs.vector());
        let c = a.cross(b);
        let angle = if a.length_squared() < MIN_V || b.length_squared() < MIN_V {
            0.0
        } else {
            c.length().atan2(a.dot(b))
        };
        Quat::axis_angle(c, angle)
    }
}

impl From<DVec3> for Quat {
    fn from(v: DVec3) -> Self {
        Self::from_vector(v)
    }
}

impl From<Quat> for DVec3 {
    fn from(q: Quat) -> Self {
        q.vector()
    }
}

// =============================================================================
// ARITHMETIC
// =============================================================================

impl Neg for Quat {
    type Output = Quat;
    fn neg(self) -> Quat {
        Quat::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Add for Quat {
    type Output = Quat;
    fn add(self, rhs: Quat) -> Quat {
        Quat::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quat {
    type Output = Quat;
    fn sub(self, rhs: Quat) -> Quat {
        Quat::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Quat {
    type Output = Quat;
    fn mul(self, s: f64) -> Quat {
        Quat::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Quat> for f64 {
    type Output = Quat;
    fn mul(self, q: Quat) -> Quat {
        q * self
    }
}

impl Div<f64> for Quat {
    type Output = Quat;
    fn div(self, s: f64) -> Quat {
        Quat::new(self.w / s, self.x / s, self.y / s, self.z / s)
    }
}
