//! Interactive parcel session as an explicit state machine.
//!
//! Purpose
//! - Own the caller-side state around the pure split core: image extent,
//!   the polygon being drawn, total area, split direction and position.
//! - Each accepted `Event` moves between `Phase`s and recomputes the
//!   `SplitResult` from scratch; rejected events leave the session untouched.
//!
//! Phases
//! - `Idle`: no image yet.
//! - `DefiningPolygon`: clicks append vertices.
//! - `PolygonReady`: polygon closed (≥ 3 vertices); clicks place the split.
//! - `SplitPlaced`: a split coordinate exists; clicks move it.
//!
//! Code cross-refs: `split::{evaluate, SplitResult}`, `DisplayScale`

use std::fmt;

use crate::geom2::{Extent, Point, Polygon};
use crate::split::{evaluate, Direction, SplitResult, SplitSpec};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    DefiningPolygon,
    PolygonReady,
    SplitPlaced,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::DefiningPolygon => "defining-polygon",
            Phase::PolygonReady => "polygon-ready",
            Phase::SplitPlaced => "split-placed",
        };
        f.write_str(s)
    }
}

/// Discrete user inputs. Coordinates are in source space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A new image was decoded; discards any polygon and split.
    ImageLoaded { extent: Extent },
    /// Begin drawing a fresh polygon.
    StartPolygon,
    AddVertex(Point),
    UndoVertex,
    /// Finish drawing; needs at least 3 vertices.
    ClosePolygon,
    SetTotalArea(f64),
    /// Switch split orientation; clears a placed split.
    SetDirection(Direction),
    PlaceSplit(f64),
    ClearSplit,
    /// Drop the polygon and go back to drawing.
    ClearPolygon,
    /// Forget everything, including the image.
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::ImageLoaded { .. } => "image-loaded",
            Event::StartPolygon => "start-polygon",
            Event::AddVertex(_) => "add-vertex",
            Event::UndoVertex => "undo-vertex",
            Event::ClosePolygon => "close-polygon",
            Event::SetTotalArea(_) => "set-total-area",
            Event::SetDirection(_) => "set-direction",
            Event::PlaceSplit(_) => "place-split",
            Event::ClearSplit => "clear-split",
            Event::ClearPolygon => "clear-polygon",
            Event::Reset => "reset",
        }
    }
}

/// Rejected transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// The event needs a loaded image.
    NoImage,
    /// Image width and height must be finite and positive.
    InvalidExtent { width: f64, height: f64 },
    /// The event is not accepted in the current phase.
    WrongPhase { phase: Phase, event: &'static str },
    /// Closing a polygon with fewer than 3 vertices.
    TooFewVertices { count: usize },
    /// Total area must be finite and non-negative.
    InvalidTotalArea(f64),
    /// Display size must be finite and positive.
    InvalidScale,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoImage => write!(f, "no image loaded"),
            SessionError::InvalidExtent { width, height } => write!(
                f,
                "image size must be finite and positive (got {width}x{height})"
            ),
            SessionError::WrongPhase { phase, event } => {
                write!(f, "event '{event}' is not accepted while {phase}")
            }
            SessionError::TooFewVertices { count } => write!(
                f,
                "polygon needs at least 3 vertices to close (has {count})"
            ),
            SessionError::InvalidTotalArea(a) => {
                write!(f, "total area must be a finite non-negative number (got {a})")
            }
            SessionError::InvalidScale => write!(f, "display size must be finite and positive"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Linear map from displayed (possibly resized) image coordinates to source
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale {
    pub displayed: Extent,
    pub natural: Extent,
}

impl DisplayScale {
    pub fn new(displayed: Extent, natural: Extent) -> Result<Self, SessionError> {
        if !displayed.is_valid() || !natural.is_valid() {
            return Err(SessionError::InvalidScale);
        }
        Ok(Self { displayed, natural })
    }

    #[inline]
    pub fn to_source(&self, p: Point) -> Point {
        Point::new(
            p.x * self.natural.width / self.displayed.width,
            p.y * self.natural.height / self.displayed.height,
        )
    }

    #[inline]
    pub fn to_display(&self, p: Point) -> Point {
        Point::new(
            p.x * self.displayed.width / self.natural.width,
            p.y * self.displayed.height / self.natural.height,
        )
    }
}

/// Caller-owned session state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    phase: Phase,
    extent: Option<Extent>,
    vertices: Vec<Point>,
    total_area: f64,
    direction: Direction,
    split_at: Option<f64>,
    result: SplitResult,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }
    #[inline]
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
    #[inline]
    pub fn total_area(&self) -> f64 {
        self.total_area
    }
    #[inline]
    pub fn split(&self) -> SplitSpec {
        SplitSpec {
            direction: self.direction,
            at: self.split_at,
        }
    }
    /// Last computed result; `SplitResult::empty()` until computable.
    #[inline]
    pub fn result(&self) -> &SplitResult {
        &self.result
    }

    /// The closed polygon, once drawing has finished.
    pub fn polygon(&self) -> Option<Polygon> {
        match self.phase {
            Phase::PolygonReady | Phase::SplitPlaced => Some(Polygon::new(self.vertices.clone())),
            _ => None,
        }
    }

    /// Apply `event`; on error nothing changes.
    pub fn apply(&mut self, event: Event) -> Result<Phase, SessionError> {
        let wrong = |phase: Phase| SessionError::WrongPhase {
            phase,
            event: event.name(),
        };
        match event {
            Event::ImageLoaded { extent } => {
                if !extent.is_valid() {
                    return Err(SessionError::InvalidExtent {
                        width: extent.width,
                        height: extent.height,
                    });
                }
                self.extent = Some(extent);
                self.vertices.clear();
                self.split_at = None;
                self.phase = Phase::DefiningPolygon;
            }
            Event::StartPolygon | Event::ClearPolygon => {
                if self.extent.is_none() {
                    return Err(SessionError::NoImage);
                }
                self.vertices.clear();
                self.split_at = None;
                self.phase = Phase::DefiningPolygon;
            }
            Event::AddVertex(p) => {
                if self.phase != Phase::DefiningPolygon {
                    return Err(wrong(self.phase));
                }
                self.vertices.push(p);
            }
            Event::UndoVertex => {
                if self.phase != Phase::DefiningPolygon {
                    return Err(wrong(self.phase));
                }
                self.vertices.pop();
            }
            Event::ClosePolygon => {
                if self.phase != Phase::DefiningPolygon {
                    return Err(wrong(self.phase));
                }
                if self.vertices.len() < 3 {
                    return Err(SessionError::TooFewVertices {
                        count: self.vertices.len(),
                    });
                }
                self.phase = Phase::PolygonReady;
            }
            Event::SetTotalArea(a) => {
                if !a.is_finite() || a < 0.0 {
                    return Err(SessionError::InvalidTotalArea(a));
                }
                self.total_area = a;
            }
            Event::SetDirection(d) => {
                if d != self.direction {
                    self.direction = d;
                    if self.phase == Phase::SplitPlaced {
                        self.split_at = None;
                        self.phase = Phase::PolygonReady;
                    }
                }
            }
            Event::PlaceSplit(at) => {
                if !matches!(self.phase, Phase::PolygonReady | Phase::SplitPlaced) {
                    return Err(wrong(self.phase));
                }
                self.split_at = Some(at);
                self.phase = Phase::SplitPlaced;
            }
            Event::ClearSplit => {
                if self.phase == Phase::SplitPlaced {
                    self.split_at = None;
                    self.phase = Phase::PolygonReady;
                }
            }
            Event::Reset => {
                *self = Self::default();
            }
        }
        self.recompute();
        Ok(self.phase)
    }

    /// Pointer click in display coordinates.
    ///
    /// Adds a vertex while drawing, otherwise places the split line through the
    /// clicked point along the current direction.
    pub fn click(&mut self, at: Point, scale: DisplayScale) -> Result<Phase, SessionError> {
        let p = scale.to_source(at);
        match self.phase {
            Phase::Idle => Err(SessionError::NoImage),
            Phase::DefiningPolygon => self.apply(Event::AddVertex(p)),
            Phase::PolygonReady | Phase::SplitPlaced => {
                let coord = match self.direction {
                    Direction::Vertical => p.x,
                    Direction::Horizontal => p.y,
                };
                self.apply(Event::PlaceSplit(coord))
            }
        }
    }

    fn recompute(&mut self) {
        self.result = match (self.polygon(), self.extent) {
            (Some(poly), Some(extent)) => {
                evaluate(&poly, self.total_area, &self.split(), extent)
            }
            _ => SplitResult::empty(),
        };
    }
}
