//! Error types for field validation and spectrum computation.

use thiserror::Error;

/// Errors raised while validating a field or computing its spectrum.
///
/// All variants describe caller contract violations and are detected
/// before any transform work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// Requested axis name is not present on the field.
    #[error("Missing axis: {0}")]
    MissingAxis(String),

    /// Axis too short for a meaningful transform.
    #[error("Degenerate axis '{axis}': length {len}, need at least {min}")]
    DegenerateAxis { axis: String, len: usize, min: usize },

    /// The latitude band selected no rows.
    #[error("Empty selection: no latitudes with {lo} < |lat| < {hi}")]
    EmptySelection { lo: f64, hi: f64 },

    /// Band bounds outside 0 <= lo < hi <= 90.
    #[error("Invalid latitude band: need 0 <= lo < hi <= 90, got lo={lo}, hi={hi}")]
    InvalidBand { lo: f64, hi: f64 },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Array shape does not match the axis description.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// The same axis name appears twice.
    #[error("Duplicate axis: {0}")]
    DuplicateAxis(String),

    /// Index selection past the end of an axis.
    #[error("Index {index} out of bounds for axis '{axis}' of length {len}")]
    IndexOutOfBounds { axis: String, index: usize, len: usize },
}

impl SpectrumError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
