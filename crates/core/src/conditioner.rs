//! Numeric conditioning: winsorization and standardization
//!
//! Applies the frozen clamp bounds first, then the frozen mean/std.
//! Nothing is rejected here: out-of-range values are clamped, and a
//! zero training-time std maps any clamped value to 0 (the feature took
//! a single value during training) instead of dividing by zero.

use crate::transform::NumericParams;

/// Clamp a raw value to the frozen `[low, high]` bounds.
pub fn winsorize(value: f64, low: f64, high: f64) -> f64 {
    value.clamp(low, high)
}

/// Standardize a clamped value with the frozen mean and std.
pub fn standardize(value: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        0.0
    } else {
        (value - mean) / std
    }
}

/// Full conditioning for one numeric feature: clamp, then standardize.
pub fn condition(value: f64, params: &NumericParams) -> f64 {
    standardize(winsorize(value, params.low, params.high), params.mean, params.std)
}
