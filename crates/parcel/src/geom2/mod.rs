//! Planar geometry for parcel splitting.
//!
//! Purpose
//! - Measure, test membership in, and clip simple polygons given as vertex
//!   rings in source (image-native) coordinates.
//! - Every operation is total: inputs that carry too little information
//!   (fewer than 3 vertices, absent window) produce empty or zero results.
//!
//! Code cross-refs: `Polygon`, `Rect`, `Extent`, `GeomCfg`, `crate::split`

pub mod area;
pub mod clip;
pub mod contains;
pub mod rand;
mod types;

pub use area::{area, signed_area};
pub use clip::{clip, clip_eps};
pub use contains::contains;
pub use types::{Extent, GeomCfg, Point, Polygon, Rect};

#[cfg(test)]
mod tests;
