//! Synthetic trajectory generation
//!
//! This module produces drag gestures for demos and detector testing:
//! - Robotic paths: straight, evenly spaced, evenly timed
//! - Humanized paths: eased progress, a slight bow, hand tremor
//! - Varied sample timing with occasional micro-pauses

pub mod humanize;

pub use humanize::*;

/// Configuration for humanized path generation
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Nominal time between samples in ms
    pub interval_ms: u64,
    /// Sample interval variance percentage (0-100)
    pub timing_variance_percent: u32,
    /// Maximum perpendicular tremor per sample in pixels
    pub tremor_px: f64,
    /// Smallest sideways bow of the whole path in pixels
    pub bow_px_min: f64,
    /// Largest sideways bow of the whole path in pixels
    pub bow_px_max: f64,
    /// Probability of a micro-pause between two samples (0.0-1.0)
    pub micro_pause_probability: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            timing_variance_percent: 30,
            tremor_px: 6.0,
            bow_px_min: 8.0,
            bow_px_max: 24.0,
            micro_pause_probability: 0.08,
        }
    }
}

impl SynthConfig {
    /// No humanization at all: the result is a robotic path
    pub fn disabled() -> Self {
        Self {
            interval_ms: 50,
            timing_variance_percent: 0,
            tremor_px: 0.0,
            bow_px_min: 0.0,
            bow_px_max: 0.0,
            micro_pause_probability: 0.0,
        }
    }

    /// A very unsteady hand
    pub fn maximum() -> Self {
        Self {
            interval_ms: 50,
            timing_variance_percent: 45,
            tremor_px: 10.0,
            bow_px_min: 15.0,
            bow_px_max: 40.0,
            micro_pause_probability: 0.15,
        }
    }
}
