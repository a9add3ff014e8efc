//! Basic 2D value types for parcel geometry.
//!
//! - `GeomCfg`: centralizes epsilons for clip classification, parallel edges and
//!   the split-ratio fallback.
//! - `Polygon`: closed ring of vertices in source (image-native) coordinates.
//! - `Rect`: axis-aligned clip window; `Extent`: full coordinate-space size.
//!
//! Code cross-refs: `area::area`, `contains::contains`, `clip::{clip, clip_eps}`

use nalgebra::Vector2;

/// A vertex in source coordinates.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// The default values are part of the clipping contract: changing them changes
/// vertex output on boundary cases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Slack for inside/outside classification against a clip boundary.
    pub eps_inside: f64,
    /// Edges whose coordinate delta along the boundary normal is below this are
    /// treated as parallel to the boundary.
    pub eps_parallel: f64,
    /// Pixel-space area below which a sub-polygon counts as empty.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_inside: 1e-6,
            eps_parallel: 1e-9,
            eps_area: 1e-6,
        }
    }
}

/// Closed polygon ring; the last vertex connects back to the first.
///
/// Invariants (not enforced):
/// - Simple (non self-intersecting). Behavior on other input is unspecified.
/// - Fewer than 3 vertices is legal but measures as empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build from `(x, y)` pairs.
    pub fn from_xy(pairs: &[(f64, f64)]) -> Self {
        Self {
            vertices: pairs.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// At least 3 vertices, the minimum for a measurable region.
    #[inline]
    pub fn is_region(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Unsigned area (shoelace).
    #[inline]
    pub fn area(&self) -> f64 {
        super::area::area(&self.vertices)
    }

    /// Ray-casting membership; points on horizontal edges count as inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        super::contains::contains(p, &self.vertices)
    }

    /// Sutherland–Hodgman clip against `window` with default tolerances.
    #[inline]
    pub fn clipped(&self, window: &Rect) -> Polygon {
        Polygon::new(super::clip::clip(&self.vertices, Some(window)))
    }

    /// Same ring, opposite winding.
    pub fn reversed(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Polygon { vertices }
    }

    /// Axis-aligned bounding box, or `None` when there are no vertices.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.vertices.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &self.vertices[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }
}

/// Axis-aligned rectangle `(x, y, width, height)`, used as a clip window.
///
/// Negative extents are accepted and behave as zero (see `right`/`bottom`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Window covering the whole coordinate space.
    #[inline]
    pub fn from_extent(extent: Extent) -> Self {
        Self::new(0.0, 0.0, extent.width, extent.height)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width.max(0.0)
    }
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height.max(0.0)
    }
}

/// Size of the source coordinate space (the image's natural width/height).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
