//! # Error Types
//!
//! Structured error types for traction_core. Every failure the engine can
//! report is a deterministic consequence of its input, so each variant names
//! the offending field and value. Callers fix the input; nothing here is
//! retried.
//!
//! ## Example
//!
//! ```rust
//! use traction_core::errors::{CalcError, CalcResult};
//!
//! fn validate_wheel(wheel_diameter_m: f64) -> CalcResult<()> {
//!     if wheel_diameter_m <= 0.0 {
//!         return Err(CalcError::degenerate_parameter(
//!             "wheel_diameter_m",
//!             wheel_diameter_m.to_string(),
//!             "Wheel diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for traction_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for simulation operations.
///
/// Serializes as `{"type": "...", "details": {...}}` so an outer service can
/// hand it back to a client unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The torque curve is empty or holds unusable torque values
    #[error("Invalid torque curve: {reason}")]
    InvalidCurve { reason: String },

    /// A value used as a divisor (wheel diameter, rear-axle ratio, gear ratio) is zero or negative
    #[error("Degenerate parameter '{field}': {value} - {reason}")]
    DegenerateParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// A value lies outside its physically meaningful range
    #[error("Parameter out of range '{field}': {value} - {reason}")]
    OutOfRangeParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// Raw user input could not be interpreted (bad gear list, unknown unit)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidCurve error
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        CalcError::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Create a DegenerateParameter error
    pub fn degenerate_parameter(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutOfRangeParameter error
    pub fn out_of_range(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::OutOfRangeParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::DegenerateParameter { field, .. }
            | CalcError::OutOfRangeParameter { field, .. }
            | CalcError::InvalidInput { field, .. } => Some(field),
            CalcError::InvalidCurve { .. } | CalcError::SerializationError { .. } => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidCurve { .. } => "INVALID_CURVE",
            CalcError::DegenerateParameter { .. } => "DEGENERATE_PARAMETER",
            CalcError::OutOfRangeParameter { .. } => "OUT_OF_RANGE_PARAMETER",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
