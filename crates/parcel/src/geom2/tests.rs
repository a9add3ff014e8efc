use super::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
use super::*;
use proptest::prelude::*;

fn star(seed: u64, index: u64) -> Polygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 60 },
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, ReplayToken { seed, index })
}

#[test]
fn polygon_methods_agree_with_free_functions() {
    let p = Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
    assert_eq!(p.area(), area(&p.vertices));
    assert!(p.contains(Point::new(1.0, 1.0)));
    let w = Rect::new(0.0, 0.0, 4.0, 5.0);
    assert_eq!(p.clipped(&w).vertices, clip(&p.vertices, Some(&w)));
    assert_eq!(p.bounding_box(), Some(Rect::new(0.0, 0.0, 10.0, 5.0)));
    assert_eq!(Polygon::default().bounding_box(), None);
}

#[test]
fn clip_splits_l_shape_at_its_notch() {
    // L shape: 10x10 square minus the [5,10]x[5,10] quadrant; area 75.
    let l = Polygon::from_xy(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (5.0, 5.0),
        (5.0, 10.0),
        (0.0, 10.0),
    ]);
    assert_eq!(l.area(), 75.0);
    let left = l.clipped(&Rect::new(0.0, 0.0, 5.0, 10.0));
    let right = l.clipped(&Rect::new(5.0, 0.0, 5.0, 10.0));
    assert!((left.area() - 50.0).abs() < 1e-9);
    assert!((right.area() - 25.0).abs() < 1e-9);
}

#[test]
fn clip_of_concave_polygon_preserves_total_area() {
    // U shape opening upward, cut through both prongs.
    let u = Polygon::from_xy(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (6.0, 10.0),
        (6.0, 4.0),
        (4.0, 4.0),
        (4.0, 10.0),
        (0.0, 10.0),
    ]);
    let top = u.clipped(&Rect::new(0.0, 0.0, 10.0, 7.0));
    let bottom = u.clipped(&Rect::new(0.0, 7.0, 10.0, 3.0));
    assert!((top.area() - 64.0).abs() < 1e-9);
    assert!((bottom.area() - 24.0).abs() < 1e-9);
    assert!((top.area() + bottom.area() - u.area()).abs() < 1e-9);
}

proptest! {
    #[test]
    fn area_is_winding_independent(seed in any::<u64>(), index in 0u64..1000) {
        let p = star(seed, index);
        let a = p.area();
        let b = p.reversed().area();
        prop_assert!(a > 0.0);
        prop_assert!((a - b).abs() <= 1e-9 * a);
    }

    #[test]
    fn clip_inside_bounding_box_is_identity(seed in any::<u64>(), index in 0u64..1000) {
        let p = star(seed, index);
        let bb = p.bounding_box().unwrap();
        prop_assert_eq!(p.clipped(&bb), p);
    }

    #[test]
    fn clip_halves_sum_to_whole(
        seed in any::<u64>(),
        index in 0u64..1000,
        frac in 0.0f64..=1.0,
        vertical in any::<bool>(),
    ) {
        let p = star(seed, index);
        let bb = p.bounding_box().unwrap();
        let (w1, w2) = if vertical {
            let s = bb.x + frac * bb.width;
            (
                Rect::new(bb.x, bb.y, s - bb.x, bb.height),
                Rect::new(s, bb.y, bb.right() - s, bb.height),
            )
        } else {
            let s = bb.y + frac * bb.height;
            (
                Rect::new(bb.x, bb.y, bb.width, s - bb.y),
                Rect::new(bb.x, s, bb.width, bb.bottom() - s),
            )
        };
        let whole = p.area();
        let parts = p.clipped(&w1).area() + p.clipped(&w2).area();
        prop_assert!((parts - whole).abs() <= 1e-3 * whole);
    }

    #[test]
    fn clipped_vertices_stay_in_window(
        seed in any::<u64>(),
        x in 0.0f64..1000.0,
        y in 0.0f64..1000.0,
        w in 0.0f64..600.0,
        h in 0.0f64..600.0,
    ) {
        let p = star(seed, 0);
        let win = Rect::new(x, y, w, h);
        let eps = GeomCfg::default().eps_inside;
        for v in p.clipped(&win).vertices {
            prop_assert!(v.x >= win.left() - eps && v.x <= win.right() + eps);
            prop_assert!(v.y >= win.top() - eps && v.y <= win.bottom() + eps);
        }
    }
}
