//! # Geometry Errors
//!
//! Error types shared by every geometry operation.

use config::constants::ConfigError;
use polygon_tess::TessError;
use std::collections::TryReserveError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type GeomResult<T> = Result<T, GeomError>;

/// Errors that can occur while building geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// Out-of-range dimension, vertex count, or self-intersecting bevel
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Too few vertices, mismatched rings, or infeasible bend
    #[error("Degenerate geometry: {message}")]
    GeometryDegenerate { message: String },

    /// Buffer allocation failed
    #[error("Allocation failure: {message}")]
    AllocationFailure { message: String },

    /// The tessellation primitive reported a fault
    #[error("Tessellation fault: {message}")]
    TessellationFault { message: String },
}

/// Discriminant of [`GeomError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    GeometryDegenerate,
    AllocationFailure,
    TessellationFault,
}

impl GeomError {
    /// Creates an invalid parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::GeometryDegenerate {
            message: message.into(),
        }
    }

    /// Creates an allocation failure error.
    pub fn allocation(message: impl Into<String>) -> Self {
        Self::AllocationFailure {
            message: message.into(),
        }
    }

    /// Creates a tessellation fault error.
    pub fn tessellation(message: impl Into<String>) -> Self {
        Self::TessellationFault {
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::GeometryDegenerate { .. } => ErrorKind::GeometryDegenerate,
            Self::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Self::TessellationFault { .. } => ErrorKind::TessellationFault,
        }
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParameter { message }
            | Self::GeometryDegenerate { message }
            | Self::AllocationFailure { message }
            | Self::TessellationFault { message } => message,
        }
    }
}

impl From<ConfigError> for GeomError {
    fn from(err: ConfigError) -> Self {
        Self::invalid(err.to_string())
    }
}

impl From<TessError> for GeomError {
    fn from(err: TessError) -> Self {
        Self::tessellation(err.to_string())
    }
}

impl From<TryReserveError> for GeomError {
    fn from(err: TryReserveError) -> Self {
        Self::allocation(err.to_string())
    }
}

/// Allocates a vector with room for `len` items, reporting failure as
/// [`GeomError::AllocationFailure`].
pub(crate) fn alloc_vec<T>(len: usize) -> GeomResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    Ok(v)
}
