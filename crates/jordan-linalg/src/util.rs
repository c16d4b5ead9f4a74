//! Scalar helpers shared by the vector and matrix code.

/// Tolerance used for approximate comparisons and for the near-zero pivot test.
pub const EPSILON: f64 = 1e-6;

/// Returns true if the two values differ by less than [`EPSILON`].
///
/// # Example
///
/// ```
/// use jordan_linalg::util::are_equal;
///
/// assert!(are_equal(0.1 + 0.2, 0.3));
/// assert!(!are_equal(1.0, 1.001));
/// ```
#[inline]
pub fn are_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Convert radians to degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Convert degrees to radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Maps negative zero to positive zero, leaving every other value untouched.
#[inline]
pub fn canonical_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
