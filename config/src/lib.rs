//! # Config Crate
//!
//! Centralized numeric thresholds for the footprint mesh pipeline.
//! Every epsilon, limit and default used by the transform, polygon,
//! tessellation and sweep code lives here so geometry code never carries
//! bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MIN_SCALE, MIN_TRANS};
//!
//! // A translation offset below MIN_TRANS is treated as identity.
//! let dx: f64 = 1.0e-9;
//! assert!(dx.abs() <= MIN_TRANS);
//!
//! // A scale factor within MIN_SCALE of 1.0 is treated as identity.
//! let sx: f64 = 1.0 + 1.0e-10;
//! assert!((sx - 1.0).abs() <= MIN_SCALE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: thresholds defined once, used everywhere
//! - **Validated Inputs**: tunables that callers may override go through
//!   a checked constructor ([`constants::SweepConfig::new`])

pub mod constants;
