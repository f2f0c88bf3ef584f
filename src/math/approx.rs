/// Fourth-order Taylor expansion of e^x around 0:
///   1 + x + x²/2 + x³/6 + x⁴/24
///
/// Accurate only for small |x|. Past |x| ≈ 5 it falls far short of the real
/// exponential, and for large negative x it grows instead of vanishing.
pub fn exponential(x: f64) -> f64 {
    let x2 = x * x;
    1.0 + x + x2 / 2.0 + x2 * x / 6.0 + x2 * x2 / 24.0
}
