//! Drive a session through a full interaction and print the split.
//!
//! Usage:
//!   cargo run -p parcel --example split_walkthrough -- [x]
//!
//! The optional argument is the vertical split position in source pixels.

use parcel::prelude::*;

fn main() -> Result<(), SessionError> {
    let at = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(600.0);

    let natural = Extent::new(1600.0, 1200.0);
    let scale = DisplayScale::new(Extent::new(800.0, 600.0), natural)?;
    let mut session = Session::new();
    session.apply(Event::ImageLoaded { extent: natural })?;
    // A trapezoidal parcel, clicked on the half-size display.
    for (x, y) in [(100.0, 100.0), (700.0, 100.0), (600.0, 500.0), (200.0, 500.0)] {
        session.click(Point::new(x, y), scale)?;
    }
    session.apply(Event::ClosePolygon)?;
    session.apply(Event::SetTotalArea(2.5))?;
    session.apply(Event::PlaceSplit(at))?;

    let r = session.result();
    println!("phase: {}", session.phase());
    println!("{}: {:.4}", r.label1, r.area1);
    println!("{}: {:.4}", r.label2, r.area2);
    if let Some((p1, p2)) = r.percentages() {
        println!("share: {p1:.1}% / {p2:.1}%");
    }
    Ok(())
}
