//! Bundled demo trajectories
//!
//! One scripted bot drag and one recorded-by-hand human drag across the
//! default course, used by the CLI and as golden test input.

use once_cell::sync::Lazy;

use crate::config::Course;
use crate::geometry::Point;

const BOT_DEMO_POINTS: usize = 19;
const BOT_DEMO_INTERVAL_MS: f64 = 50.0;

const HUMAN_DEMO_SAMPLES: [(f64, f64, f64); 18] = [
    (100.0, 200.0, 0.0),
    (128.0, 203.0, 48.0),
    (161.0, 197.0, 101.0),
    (190.0, 204.0, 149.0),
    (226.0, 199.0, 203.0),
    (259.0, 195.0, 251.0),
    (288.0, 202.0, 306.0),
    (324.0, 205.0, 352.0),
    (357.0, 198.0, 405.0),
    (391.0, 196.0, 457.0),
    (422.0, 203.0, 509.0),
    (458.0, 201.0, 558.0),
    (493.0, 195.0, 612.0),
    (527.0, 199.0, 660.0),
    (561.0, 204.0, 715.0),
    (598.0, 198.0, 764.0),
    (641.0, 202.0, 818.0),
    (700.0, 200.0, 870.0),
];

/// Straight, evenly timed drag from (100, 200) to (700, 200)
pub static BOT_DEMO: Lazy<Vec<Point>> = Lazy::new(|| {
    let steps = (BOT_DEMO_POINTS - 1) as f64;
    (0..BOT_DEMO_POINTS)
        .map(|i| {
            let i = i as f64;
            Point::new(100.0 + i * 600.0 / steps, 200.0, i * BOT_DEMO_INTERVAL_MS)
        })
        .collect()
});

/// Wobbly drag with ±5px tremor and uneven ~50ms sampling
pub static HUMAN_DEMO: Lazy<Vec<Point>> = Lazy::new(|| {
    HUMAN_DEMO_SAMPLES
        .iter()
        .copied()
        .map(Point::from)
        .collect()
});

/// The course both demos were drawn on
pub fn demo_course() -> Course {
    Course::default()
}
