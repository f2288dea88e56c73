//! Pointer gesture capture
//!
//! Owns the mutable sample buffer for the gesture in progress and hands
//! finished trajectories to the detection engine.

pub mod recorder;

pub use recorder::{GestureError, GesturePhase, GestureRecorder, LiveReading};
