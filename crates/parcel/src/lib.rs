//! Parcel area splitting.
//!
//! A user outlines a parcel as a simple polygon over an image, states its
//! real-world area, and draws one axis-aligned split line. This crate measures
//! how that area divides between the two sides.
//!
//! Layout
//! - `geom2`: shoelace area, ray-casting containment, Sutherland–Hodgman clip.
//! - `split`: the orchestration called on every interaction (`evaluate`).
//! - `session`: caller-owned state machine around `evaluate`.
//!
//! Everything in `geom2` and `split` is pure and total: degenerate input gives
//! empty or zero output, never an error.

pub mod geom2;
pub mod session;
pub mod split;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{Extent, GeomCfg, Point, Polygon, Rect};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
    pub use crate::geom2::{
        area, clip, clip_eps, contains, signed_area, Extent, GeomCfg, Point, Polygon, Rect,
    };
    pub use crate::session::{DisplayScale, Event, Phase, Session, SessionError};
    pub use crate::split::{
        evaluate, evaluate_eps, split_windows, Direction, SplitResult, SplitSpec,
    };
}
