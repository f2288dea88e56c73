//! Pointer samples and anchor targets
//!
//! All coordinates live in the same canvas-pixel space; timestamps are
//! milliseconds since the first sample of the current gesture.

use serde::{Deserialize, Serialize};

/// A single timestamped pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in pixels
    pub x: f64,
    /// Vertical position in pixels
    pub y: f64,
    /// Milliseconds since the first sample of the gesture
    pub t: f64,
}

impl Point {
    /// Create a new sample
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Euclidean distance to another sample, ignoring time
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction of the segment from this sample to `other`, in radians
    pub fn heading_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Check that position and timestamp are all finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, t): (f64, f64, f64)) -> Self {
        Self::new(x, y, t)
    }
}

/// A fixed start or end target with its acceptance radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    /// Capture radius (start) or release radius (end) in pixels
    pub radius: f64,
}

impl Anchor {
    /// Create a new anchor
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Distance from the anchor centre to a position
    pub fn distance_to_xy(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }

    /// Distance between two anchor centres
    pub fn distance_to(&self, other: &Anchor) -> f64 {
        self.distance_to_xy(other.x, other.y)
    }

    /// Whether a position falls inside the acceptance radius
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to_xy(x, y) <= self.radius
    }
}
