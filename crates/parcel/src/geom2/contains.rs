use super::types::Point;

/// Ray-casting point-in-polygon test.
///
/// Edges are walked as `(poly[i], poly[j])` with `j` the previous index.
/// Horizontal edges never toggle the parity; a point lying on one (x within
/// the edge's range, inclusive) is inside and short-circuits the walk. Other
/// boundary points follow the parity rule.
pub fn contains(p: Point, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if pi.y == pj.y {
            if p.y == pi.y && p.x >= pi.x.min(pj.x) && p.x <= pi.x.max(pj.x) {
                return true;
            }
        } else if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
