//! Geometry primitives
//!
//! Pointer samples, anchor targets and the ideal line a gesture is
//! measured against.

pub mod line;
pub mod point;

pub use line::{turn_angle, Line};
pub use point::{Anchor, Point};
