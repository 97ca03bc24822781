//! Tolerance constants for strain comparisons.
//!
//! Different operations require different precision levels.

/// Floating point rounding errors (axis arithmetic, passthrough).
pub const FLOAT_EPSILON: f64 = 1e-12;

/// Single forward or inverse transform of O(1) data.
pub const FFT_EPSILON: f64 = 1e-9;

/// Chained operations (model evaluation followed by a transform).
pub const STRAIN_EPSILON: f64 = 1e-8;
