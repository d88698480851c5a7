//! Centralized thresholds shared across the footprint mesh crates.
//!
//! Each public item documents its purpose and provides a minimal usage
//! example so that downstream crates can stay declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// TRANSFORM THRESHOLDS
// =============================================================================

/// Smallest `|w|` a quaternion may carry and still be normalized.
///
/// # Examples
/// ```
/// use config::constants::MIN_W;
/// assert!(MIN_W > 0.0);
/// ```
pub const MIN_W: f64 = 1.0e-9;

/// Squared vector magnitude below which an axis is considered zero.
///
/// # Examples
/// ```
/// use config::constants::MIN_V;
/// assert!(MIN_V < 1.0e-20);
/// ```
pub const MIN_V: f64 = 1.0e-24;

/// Squared half-angle (radians²) below which a rotation collapses to identity.
///
/// # Examples
/// ```
/// use config::constants::MIN_ANGLE;
/// assert!(MIN_ANGLE < 1.0e-9);
/// ```
pub const MIN_ANGLE: f64 = 1.0e-12;

/// Largest deviation from 1.0 a scale factor may have and still be identity.
///
/// # Examples
/// ```
/// use config::constants::MIN_SCALE;
/// assert!((1.0f64 + 1.0e-9 - 1.0).abs() <= MIN_SCALE);
/// ```
pub const MIN_SCALE: f64 = 1.0e-8;

/// Largest translation component that is still treated as zero.
///
/// # Examples
/// ```
/// use config::constants::MIN_TRANS;
/// assert!(MIN_TRANS <= 1.0e-8);
/// ```
pub const MIN_TRANS: f64 = 1.0e-8;

// =============================================================================
// POLYGON LIMITS
// =============================================================================

/// Smallest rectangle side or outline extent accepted by `calc`.
pub const MIN_EXTENT: f64 = 1.0e-6;

/// Smallest ellipse radius accepted by `calc`.
pub const MIN_RADIUS: f64 = 1.0e-6;

/// Largest ellipse radius accepted by `calc`.
pub const MAX_RADIUS: f64 = 100.0;

/// Fewest vertices an ellipse may be built from.
pub const MIN_SEGMENTS: u32 = 3;

/// Most vertices an ellipse may be built from.
pub const MAX_SEGMENTS: u32 = 360;

/// Vertex count used by ellipses when the caller does not pick one.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS};
/// assert!((MIN_SEGMENTS..=MAX_SEGMENTS).contains(&DEFAULT_SEGMENTS));
/// ```
pub const DEFAULT_SEGMENTS: u32 = 16;

// =============================================================================
// TESSELLATION
// =============================================================================

/// Tolerance used when rejecting degenerate triangles: two edges whose
/// coordinate deltas or slopes differ by less than this are parallel.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_EPSILON;
/// assert_eq!(DEGENERATE_EPSILON, 1.0e-9);
/// ```
pub const DEGENERATE_EPSILON: f64 = 1.0e-9;

// =============================================================================
// PATH SWEEP
// =============================================================================

/// Default number of arc facets per 90 degrees of bend.
pub const DEFAULT_BEND_SEGMENTS: u32 = 5;

/// Default inner bend radius of a swept wire.
pub const DEFAULT_BEND_RADIUS: f64 = 1.0;

/// Fewest arc facets per 90 degrees.
pub const MIN_BEND_SEGMENTS: u32 = 2;

/// Most arc facets per 90 degrees.
pub const MAX_BEND_SEGMENTS: u32 = 90;

/// Smallest accepted bend radius.
pub const MIN_BEND_RADIUS: f64 = 1.0e-9;

/// Largest `|sin θ|` between consecutive sweep directions still treated
/// as a straight continuation.
///
/// # Examples
/// ```
/// use config::constants::COLLINEAR_EPSILON;
/// assert!(COLLINEAR_EPSILON > 0.0 && COLLINEAR_EPSILON < 1.0e-6);
/// ```
pub const COLLINEAR_EPSILON: f64 = 1.0e-9;

/// Validated bend parameters of a path sweep.
///
/// # Examples
/// ```
/// use config::constants::SweepConfig;
/// let config = SweepConfig::default();
/// assert_eq!(config.segments_per_90, 5);
/// assert!(config.bend_radius > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Arc facets generated per 90 degrees of bend.
    pub segments_per_90: u32,
    /// Inner radius of every bend.
    pub bend_radius: f64,
}

impl SweepConfig {
    /// Builds a configuration, rejecting segment densities outside
    /// `MIN_BEND_SEGMENTS..=MAX_BEND_SEGMENTS` and radii below
    /// `MIN_BEND_RADIUS`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SweepConfig;
    /// let cfg = SweepConfig::new(8, 0.5).expect("valid config");
    /// assert_eq!(cfg.segments_per_90, 8);
    /// assert!(SweepConfig::new(1, 0.5).is_err());
    /// ```
    pub fn new(segments_per_90: u32, bend_radius: f64) -> Result<Self, ConfigError> {
        if !(MIN_BEND_SEGMENTS..=MAX_BEND_SEGMENTS).contains(&segments_per_90) {
            return Err(ConfigError::InvalidSegments(segments_per_90));
        }
        if !bend_radius.is_finite() || bend_radius < MIN_BEND_RADIUS {
            return Err(ConfigError::InvalidRadius(bend_radius));
        }
        Ok(Self {
            segments_per_90,
            bend_radius,
        })
    }

    /// Arc facets per radian of bend.
    pub fn segments_per_radian(&self) -> f64 {
        f64::from(self.segments_per_90) * 2.0 / std::f64::consts::PI
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            segments_per_90: DEFAULT_BEND_SEGMENTS,
            bend_radius: DEFAULT_BEND_RADIUS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the bend segment density is out of range.
    InvalidSegments(u32),
    /// Raised when the bend radius is too small or not finite.
    InvalidRadius(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => write!(
                f,
                "bend segments must be in {MIN_BEND_SEGMENTS}..={MAX_BEND_SEGMENTS}: {value}"
            ),
            ConfigError::InvalidRadius(value) => {
                write!(f, "bend radius must be >= {MIN_BEND_RADIUS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
