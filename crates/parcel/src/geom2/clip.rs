//! Sutherland–Hodgman clipping against an axis-aligned window.
//!
//! The window is applied as four successive half-plane clips in the fixed
//! order left, right, top, bottom; each pass consumes the previous output.
//! The order is observable in the output vertex sequence, so keep it.
//!
//! Tolerances (see `GeomCfg`)
//! - `eps_inside`: a vertex within this distance outside a boundary is inside.
//! - `eps_parallel`: an edge whose delta across the boundary is below this is
//!   parallel to it; its intersection is the predecessor projected onto the
//!   boundary instead of an interpolation.

use super::types::{GeomCfg, Point, Rect};

/// One side of the clip window.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Boundary {
    /// Keep `x >= v`.
    Left(f64),
    /// Keep `x <= v`.
    Right(f64),
    /// Keep `y >= v`.
    Top(f64),
    /// Keep `y <= v`.
    Bottom(f64),
}

impl Boundary {
    #[inline]
    fn keeps(self, p: Point, eps: f64) -> bool {
        match self {
            Boundary::Left(v) => p.x >= v - eps,
            Boundary::Right(v) => p.x <= v + eps,
            Boundary::Top(v) => p.y >= v - eps,
            Boundary::Bottom(v) => p.y <= v + eps,
        }
    }

    /// Point where edge `prev → cur` meets the boundary line.
    fn intersect(self, prev: Point, cur: Point, eps_parallel: f64) -> Point {
        match self {
            Boundary::Left(v) | Boundary::Right(v) => {
                let dx = cur.x - prev.x;
                if dx.abs() < eps_parallel {
                    return Point::new(v, prev.y);
                }
                let t = (v - prev.x) / dx;
                Point::new(v, prev.y + t * (cur.y - prev.y))
            }
            Boundary::Top(v) | Boundary::Bottom(v) => {
                let dy = cur.y - prev.y;
                if dy.abs() < eps_parallel {
                    return Point::new(prev.x, v);
                }
                let t = (v - prev.y) / dy;
                Point::new(prev.x + t * (cur.x - prev.x), v)
            }
        }
    }
}

/// Clip `poly` to `window` with the default tolerances.
///
/// Returns an empty ring when the window is absent, the polygon has fewer than
/// 3 vertices, or nothing of the polygon lies inside the window. The result
/// may have more vertices than the input.
#[inline]
pub fn clip(poly: &[Point], window: Option<&Rect>) -> Vec<Point> {
    clip_eps(poly, window, GeomCfg::default())
}

/// `clip` with explicit tolerances.
pub fn clip_eps(poly: &[Point], window: Option<&Rect>, cfg: GeomCfg) -> Vec<Point> {
    let Some(w) = window else {
        return Vec::new();
    };
    if poly.len() < 3 {
        return Vec::new();
    }
    let boundaries = [
        Boundary::Left(w.left()),
        Boundary::Right(w.right()),
        Boundary::Top(w.top()),
        Boundary::Bottom(w.bottom()),
    ];
    let mut out = poly.to_vec();
    for b in boundaries {
        if out.is_empty() {
            break;
        }
        out = clip_half_plane(&out, b, cfg);
    }
    out
}

fn clip_half_plane(input: &[Point], b: Boundary, cfg: GeomCfg) -> Vec<Point> {
    let n = input.len();
    let mut out = Vec::with_capacity(n + 2);
    let mut prev = input[n - 1];
    let mut prev_in = b.keeps(prev, cfg.eps_inside);
    for &cur in input {
        let cur_in = b.keeps(cur, cfg.eps_inside);
        if cur_in != prev_in {
            out.push(b.intersect(prev, cur, cfg.eps_parallel));
        }
        if cur_in {
            out.push(cur);
        }
        prev = cur;
        prev_in = cur_in;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::area::area;

    fn square(s: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(s, 0.0),
            Point::new(s, s),
            Point::new(0.0, s),
        ]
    }

    #[test]
    fn absent_window_or_short_polygon_is_empty() {
        assert!(clip(&square(10.0), None).is_empty());
        let w = Rect::new(0.0, 0.0, 5.0, 5.0);
        let seg = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(clip(&seg, Some(&w)).is_empty());
    }

    #[test]
    fn contained_polygon_is_unchanged() {
        let sq = square(10.0);
        let w = Rect::new(-1.0, -1.0, 20.0, 20.0);
        assert_eq!(clip(&sq, Some(&w)), sq);
    }

    #[test]
    fn window_touching_polygon_boundary_keeps_it() {
        let sq = square(10.0);
        let w = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(clip(&sq, Some(&w)), sq);
    }

    #[test]
    fn vertical_cut_of_square() {
        let sq = square(10.0);
        let w = Rect::new(0.0, 0.0, 3.0, 10.0);
        let out = clip(&sq, Some(&w));
        assert_eq!(
            out,
            vec![
                Point::new(0.0, 0.0),
                Point::new(3.0, 0.0),
                Point::new(3.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert!((area(&out) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_window_is_empty() {
        let sq = square(10.0);
        let w = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(clip(&sq, Some(&w)).is_empty());
    }

    #[test]
    fn zero_width_window_yields_zero_area() {
        let sq = square(10.0);
        let w = Rect::new(4.0, 0.0, 0.0, 10.0);
        let out = clip(&sq, Some(&w));
        assert!(area(&out) < 1e-12);
        assert!(out.iter().all(|p| (p.x - 4.0).abs() < 1e-12));
    }

    #[test]
    fn negative_extent_behaves_as_zero() {
        let sq = square(10.0);
        let w = Rect::new(4.0, 0.0, -3.0, 10.0);
        assert!(area(&clip(&sq, Some(&w))) < 1e-12);
    }

    #[test]
    fn corner_window_on_triangle() {
        // Right triangle with legs 10; the hypotenuse x+y=10 passes through
        // (5,5), so the window [0,5]x[0,5] is fully covered.
        let tri = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        let w = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!((area(&clip(&tri, Some(&w))) - 25.0).abs() < 1e-9);
        // Window [5,10]x[0,5] holds the lower-right half-square below x+y=10.
        let w = Rect::new(5.0, 0.0, 5.0, 5.0);
        assert!((area(&clip(&tri, Some(&w))) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn parallel_edge_projects_predecessor() {
        let b = Boundary::Left(2.0);
        let p = b.intersect(Point::new(1.0, 3.0), Point::new(1.0, 8.0), 1e-9);
        assert_eq!(p, Point::new(2.0, 3.0));
        let b = Boundary::Bottom(2.0);
        let p = b.intersect(Point::new(1.0, 3.0), Point::new(6.0, 3.0), 1e-9);
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn vertex_on_boundary_counts_as_inside() {
        // Only the vertex (5, 0) touches the window; the ring collapses onto it.
        let tri = [
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let w = Rect::new(0.0, 0.0, 5.0, 10.0);
        let out = clip(&tri, Some(&w));
        assert!(!out.is_empty());
        assert!(out.iter().all(|p| *p == Point::new(5.0, 0.0)));
        assert_eq!(area(&out), 0.0);
    }
}
