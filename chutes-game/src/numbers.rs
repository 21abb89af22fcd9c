//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
#[must_use]
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    usize_to_f64(numerator) / usize_to_f64(denominator)
}
