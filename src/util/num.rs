/// Largest `n` for which `n!` is finite as an `f64`.
pub const MAX_FACTORIAL_ARGUMENT: u32 = 170;

/// Checks whether two values are equal within `precision`.
///
/// The tolerance is absolute for magnitudes up to one and relative beyond, so
/// `precision` keeps its meaning for both tiny and huge operands.
///
/// ## Example
/// ```
/// use calculate::util::num::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3, 1e-12));
/// assert!(approx_eq(1e20, 1e20 + 1.0, 1e-12));
/// assert!(!approx_eq(1.0, 1.001, 1e-12));
/// ```
#[must_use]
pub fn approx_eq(a: f64, b: f64, precision: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = 1f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= precision * scale
}

/// Returns the nearest integer to `value` if `value` is integral within
/// `precision`.
///
/// ## Example
/// ```
/// use calculate::util::num::integral_value;
///
/// assert_eq!(integral_value(3.0000000000001, 1e-12), Some(3.0));
/// assert_eq!(integral_value(2.5, 1e-12), None);
/// assert_eq!(integral_value(f64::NAN, 1e-12), None);
/// ```
#[must_use]
pub fn integral_value(value: f64, precision: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    approx_eq(value, rounded, precision).then_some(rounded)
}

/// Converts an integral, non-negative `value` to `u32` if it does not exceed
/// `max`.
///
/// Returns `None` for fractional, negative or out-of-range values.
///
/// ## Example
/// ```
/// use calculate::util::num::small_natural;
///
/// assert_eq!(small_natural(5.0, 1e-12, 170), Some(5));
/// assert_eq!(small_natural(-1.0, 1e-12, 170), None);
/// assert_eq!(small_natural(171.0, 1e-12, 170), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn small_natural(value: f64, precision: f64, max: u32) -> Option<u32> {
    let n = integral_value(value, precision)?;
    if n < 0.0 || n > f64::from(max) {
        return None;
    }
    Some(n as u32)
}
