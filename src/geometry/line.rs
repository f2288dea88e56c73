//! The ideal straight line between two anchors
//!
//! Stored in implicit form `a·x + b·y = c` so perpendicular distance is a
//! single division.

use std::f64::consts::PI;

use super::Anchor;

/// Infinite line through two anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
    norm: f64,
}

impl Line {
    /// Build the line through `start` and `end`
    pub fn through(start: &Anchor, end: &Anchor) -> Self {
        let a = end.y - start.y;
        let b = start.x - end.x;
        let c = a * start.x + b * start.y;

        Self {
            a,
            b,
            c,
            norm: (a * a + b * b).sqrt(),
        }
    }

    /// True when both anchors coincide and no direction exists
    pub fn is_degenerate(&self) -> bool {
        self.norm == 0.0
    }

    /// Perpendicular distance from a position to the line
    ///
    /// Returns 0 for a degenerate line.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }

        (self.a * x + self.b * y - self.c).abs() / self.norm
    }
}

/// Absolute difference between two headings, folded into `[0, π]`
pub fn turn_angle(from: f64, to: f64) -> f64 {
    let diff = (to - from).abs();
    if diff > PI {
        2.0 * PI - diff
    } else {
        diff
    }
}
