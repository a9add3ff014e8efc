//! Split evaluation: divide a known parcel area along a straight line.
//!
//! The split line is axis-aligned. The extent is partitioned into two windows
//! at the split coordinate, the polygon is clipped to each, and the ratio of
//! the two pixel-space areas distributes the caller's total area. The ratio is
//! what gets propagated: `area1 + area2 == total_area` up to rounding, even if
//! the two clipped areas do not sum to the polygon's own area.
//!
//! Code cross-refs: `geom2::{clip, area}`, `session::Session`

use std::fmt;

use crate::geom2::{area, clip_eps, Extent, GeomCfg, Polygon, Rect};

/// Orientation of the split line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Line `x = at`; sides Left/Right.
    #[default]
    Vertical,
    /// Line `y = at`; sides Top/Bottom.
    Horizontal,
}

impl Direction {
    /// Side labels `(first, second)` for this direction.
    #[inline]
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            Direction::Vertical => ("Left Area", "Right Area"),
            Direction::Horizontal => ("Top Area", "Bottom Area"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Vertical => write!(f, "vertical"),
            Direction::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Direction::Vertical),
            "horizontal" | "h" => Ok(Direction::Horizontal),
            other => Err(format!("unknown split direction '{other}'")),
        }
    }
}

/// Split line: direction plus position along the perpendicular axis.
///
/// `at == None` means no line has been placed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SplitSpec {
    pub direction: Direction,
    pub at: Option<f64>,
}

impl SplitSpec {
    #[inline]
    pub fn vertical(x: f64) -> Self {
        Self {
            direction: Direction::Vertical,
            at: Some(x),
        }
    }
    #[inline]
    pub fn horizontal(y: f64) -> Self {
        Self {
            direction: Direction::Horizontal,
            at: Some(y),
        }
    }
}

/// Labels of the zero-filled result.
pub const GENERIC_LABELS: (&str, &str) = ("Area 1", "Area 2");

/// Outcome of a split: distributed areas, side labels, and the clipped rings.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitResult {
    pub area1: f64,
    pub area2: f64,
    pub label1: &'static str,
    pub label2: &'static str,
    pub sub1: Polygon,
    pub sub2: Polygon,
}

impl SplitResult {
    /// The "nothing to split yet" state.
    pub fn empty() -> Self {
        Self {
            area1: 0.0,
            area2: 0.0,
            label1: GENERIC_LABELS.0,
            label2: GENERIC_LABELS.1,
            sub1: Polygon::default(),
            sub2: Polygon::default(),
        }
    }

    /// True unless this is the zero-filled result.
    #[inline]
    pub fn is_computed(&self) -> bool {
        *self != Self::empty()
    }

    /// Display percentages of each side.
    ///
    /// Relative to `area1 + area2`, not to the nominal total area. `None` when
    /// that sum is not positive.
    pub fn percentages(&self) -> Option<(f64, f64)> {
        let sum = self.area1 + self.area2;
        if sum > 0.0 {
            Some((self.area1 / sum * 100.0, self.area2 / sum * 100.0))
        } else {
            None
        }
    }
}

impl Default for SplitResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// The two windows partitioning `extent` at the split coordinate.
pub fn split_windows(spec: &SplitSpec, extent: Extent) -> Option<(Rect, Rect)> {
    let s = spec.at?;
    Some(match spec.direction {
        Direction::Vertical => (
            Rect::new(0.0, 0.0, s, extent.height),
            Rect::new(s, 0.0, extent.width - s, extent.height),
        ),
        Direction::Horizontal => (
            Rect::new(0.0, 0.0, extent.width, s),
            Rect::new(0.0, s, extent.width, extent.height - s),
        ),
    })
}

/// Distribute `total_area` between the two sides of `spec`.
///
/// Returns `SplitResult::empty()` when the split has no coordinate, the polygon
/// has fewer than 3 vertices, or `total_area` is not positive.
pub fn evaluate(
    polygon: &Polygon,
    total_area: f64,
    spec: &SplitSpec,
    extent: Extent,
) -> SplitResult {
    evaluate_eps(polygon, total_area, spec, extent, GeomCfg::default())
}

/// `evaluate` with explicit tolerances.
pub fn evaluate_eps(
    polygon: &Polygon,
    total_area: f64,
    spec: &SplitSpec,
    extent: Extent,
    cfg: GeomCfg,
) -> SplitResult {
    // `!(x > 0)` also rejects NaN.
    if !polygon.is_region() || !(total_area > 0.0) {
        return SplitResult::empty();
    }
    let Some((w1, w2)) = split_windows(spec, extent) else {
        return SplitResult::empty();
    };
    let sub1 = Polygon::new(clip_eps(&polygon.vertices, Some(&w1), cfg));
    let sub2 = Polygon::new(clip_eps(&polygon.vertices, Some(&w2), cfg));
    let p1 = area(&sub1.vertices);
    let p2 = area(&sub2.vertices);
    let ratio = if p1 + p2 > cfg.eps_area {
        p1 / (p1 + p2)
    } else if p1 > cfg.eps_area {
        1.0
    } else {
        0.0
    };
    let (label1, label2) = spec.direction.labels();
    SplitResult {
        area1: total_area * ratio,
        area2: total_area * (1.0 - ratio),
        label1,
        label2,
        sub1,
        sub2,
    }
}
