//! Replay a recorded list of session events from JSON.
//!
//! ```json
//! {"events": [
//!   {"image_loaded": {"width": 100, "height": 100}},
//!   {"add_vertex": [0, 0]}, {"add_vertex": [100, 0]}, {"add_vertex": [100, 100]},
//!   "close_polygon",
//!   {"set_total_area": 1000},
//!   {"place_split": 30}
//! ]}
//! ```

use anyhow::{Context, Result};
use parcel::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptDirection {
    Vertical,
    Horizontal,
}

impl From<ScriptDirection> for Direction {
    fn from(d: ScriptDirection) -> Self {
        match d {
            ScriptDirection::Vertical => Direction::Vertical,
            ScriptDirection::Horizontal => Direction::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    ImageLoaded {
        width: f64,
        height: f64,
    },
    StartPolygon,
    AddVertex([f64; 2]),
    UndoVertex,
    ClosePolygon,
    SetTotalArea(f64),
    SetDirection(ScriptDirection),
    PlaceSplit(f64),
    ClearSplit,
    ClearPolygon,
    Reset,
    /// Pointer click on a displayed image of the given size.
    Click {
        x: f64,
        y: f64,
        display_width: f64,
        display_height: f64,
    },
}

pub fn load_script(path: &Path) -> Result<Script> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading events {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing events {}", path.display()))
}

fn apply(session: &mut Session, ev: ScriptEvent) -> Result<Phase, SessionError> {
    let event = match ev {
        ScriptEvent::ImageLoaded { width, height } => Event::ImageLoaded {
            extent: Extent::new(width, height),
        },
        ScriptEvent::StartPolygon => Event::StartPolygon,
        ScriptEvent::AddVertex([x, y]) => Event::AddVertex(Point::new(x, y)),
        ScriptEvent::UndoVertex => Event::UndoVertex,
        ScriptEvent::ClosePolygon => Event::ClosePolygon,
        ScriptEvent::SetTotalArea(a) => Event::SetTotalArea(a),
        ScriptEvent::SetDirection(d) => Event::SetDirection(d.into()),
        ScriptEvent::PlaceSplit(at) => Event::PlaceSplit(at),
        ScriptEvent::ClearSplit => Event::ClearSplit,
        ScriptEvent::ClearPolygon => Event::ClearPolygon,
        ScriptEvent::Reset => Event::Reset,
        ScriptEvent::Click {
            x,
            y,
            display_width,
            display_height,
        } => {
            let natural = session.extent().ok_or(SessionError::NoImage)?;
            let scale = DisplayScale::new(Extent::new(display_width, display_height), natural)?;
            return session.click(Point::new(x, y), scale);
        }
    };
    session.apply(event)
}

/// Run all events; rejected ones are logged and listed, not fatal.
pub fn run(script: &Script) -> (Session, Vec<Value>) {
    let mut session = Session::new();
    let mut rejected = Vec::new();
    for (index, ev) in script.events.iter().enumerate() {
        match apply(&mut session, *ev) {
            Ok(phase) => tracing::debug!(index, %phase, "event_applied"),
            Err(err) => {
                tracing::warn!(index, event = ?ev, %err, "event_rejected");
                rejected.push(json!({ "index": index, "error": err.to_string() }));
            }
        }
    }
    (session, rejected)
}

pub fn session_json(session: &Session, rejected: Vec<Value>) -> Value {
    let split = session.split();
    json!({
        "phase": session.phase().to_string(),
        "extent": session.extent().map(|e| [e.width, e.height]),
        "vertices": crate::points_json(session.vertices()),
        "total_area": session.total_area(),
        "split": {
            "direction": split.direction.to_string(),
            "at": split.at,
        },
        "result": crate::result_json(session.result()),
        "rejected": rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{"events": [
        "close_polygon",
        {"image_loaded": {"width": 100, "height": 100}},
        {"add_vertex": [0, 0]},
        {"add_vertex": [100, 0]},
        {"add_vertex": [100, 100]},
        {"click": {"x": 0, "y": 50, "display_width": 50, "display_height": 50}},
        "close_polygon",
        {"set_total_area": 1000},
        {"set_direction": "horizontal"},
        {"click": {"x": 10, "y": 10, "display_width": 50, "display_height": 50}}
    ]}"#;

    #[test]
    fn script_replays_to_horizontal_split() {
        let script: Script = serde_json::from_str(SCRIPT).unwrap();
        let (session, rejected) = run(&script);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0]["index"], 0);
        assert_eq!(session.phase(), Phase::SplitPlaced);
        assert_eq!(session.split().at, Some(20.0));
        let r = session.result();
        assert_eq!(r.label1, "Top Area");
        assert!((r.area1 - 200.0).abs() < 1e-9);
        assert!((r.area2 - 800.0).abs() < 1e-9);

        let v = session_json(&session, rejected);
        assert_eq!(v["phase"], "split-placed");
        assert_eq!(v["split"]["direction"], "horizontal");
        assert_eq!(v["result"]["label2"], "Bottom Area");
    }

    #[test]
    fn unknown_event_fails_to_parse() {
        let bad = r#"{"events": ["teleport"]}"#;
        assert!(serde_json::from_str::<Script>(bad).is_err());
    }
}
