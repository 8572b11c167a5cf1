//! # Error Types
//!
//! Structured error types for stressblock_core. Each failure class of the
//! integration engine has its own variant so callers (typically an outer
//! neutral-axis search) can special-case the recoverable ones.
//!
//! ## Example
//!
//! ```rust
//! use stressblock_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth: f64) -> CalcResult<()> {
//!     if depth <= 0.0 {
//!         return Err(CalcError::invalid_geometry(
//!             "depth",
//!             depth.to_string(),
//!             "Depth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_depth(-1.0).unwrap_err().error_code(), "INVALID_GEOMETRY");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stressblock_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for stress-block evaluation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A scalar input is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The section profile or compression-zone depth is inconsistent
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// The strain at the compressed edge is zero, so the strain slope is undefined
    #[error("Degenerate strain profile: strain_top = {strain_top}")]
    DegenerateStrain { strain_top: f64 },

    /// The resultant force is zero and the lever arm is undefined
    #[error("Zero resultant force: lever arm undefined (moment = {moment})")]
    ZeroForce { moment: f64 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// A zero resultant can occur legitimately during a neutral-axis search;
    /// the caller adjusts the trial depth and evaluates again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::ZeroForce { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateStrain { .. } => "DEGENERATE_STRAIN",
            CalcError::ZeroForce { .. } => "ZERO_FORCE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
