//! Print area / intersection / union / IoU for a few fixed pairs and a handful of
//! random boxes.
//!
//! Usage:
//!   cargo run -p polyiou --example scenarios
//!   cargo run -p polyiou --example scenarios -- 2018

use polyiou::api::{area, area_intersection, area_union, evaluate, iou, make_polygon};
use polyiou::geom2::{point, Polygon};
use polyiou::rand2::{Frame, ShapeGenerator};

fn square(x0: f64, y0: f64) -> Polygon<f64> {
    make_polygon([
        point(x0, y0),
        point(x0 + 1.0, y0),
        point(x0 + 1.0, y0 + 1.0),
        point(x0, y0 + 1.0),
    ])
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2018);

    let unit = square(0.0, 0.0);
    let pairs = [
        ("self", square(0.0, 0.0)),
        ("disjoint", square(2.0, 0.0)),
        ("half shift", square(0.5, 0.0)),
        ("shared edge", square(1.0, 0.0)),
    ];
    for (name, other) in &pairs {
        println!(
            "{name:>12}: area={:.4} inter={:.4} union={:.4} iou={:?}",
            area(&unit),
            area_intersection(&unit, other),
            area_union(&unit, other),
            iou(&unit, other)
        );
    }

    let degenerate = make_polygon([point(0.0, 0.0), point(0.0, 0.0)]);
    println!(
        "{:>12}: inter={} (sentinel)",
        "degenerate",
        area_intersection(&unit, &degenerate)
    );

    let frame = Frame::default();
    let mut gen = ShapeGenerator::new(seed);
    for i in 0..5 {
        let (Ok(a), Ok(b)) = (gen.axis_aligned_box(frame), gen.axis_aligned_box(frame)) else {
            eprintln!("box draw failed");
            return;
        };
        match evaluate(&a, &b) {
            Ok(r) => println!(
                "box pair {i}: inter={:.1} union={:.1} iou={:.4}",
                r.intersection, r.union, r.iou
            ),
            Err(e) => println!("box pair {i}: {e}"),
        }
    }
}
