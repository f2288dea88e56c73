//! Configuration module
//!
//! Handles detection thresholds, challenge geometry and gesture gating.

pub mod settings;

pub use settings::{ConfigError, Course, GestureSettings, HumanThresholds, Settings, Thresholds};
