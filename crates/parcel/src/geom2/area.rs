use super::types::Point;

/// Unsigned polygon area via the shoelace formula.
///
/// Indices wrap, so the ring closes implicitly. Fewer than 3 vertices sum to
/// exactly 0 without a special case.
pub fn area(poly: &[Point]) -> f64 {
    signed_area(poly).abs()
}

/// Signed shoelace area: positive for counterclockwise rings (y up).
pub fn signed_area(poly: &[Point]) -> f64 {
    let n = poly.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p = poly[i];
        let q = poly[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}
