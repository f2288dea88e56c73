//! Trajectory feature extraction
//!
//! Reduces a pointer sample sequence to four scalar features:
//! - deviation: mean perpendicular distance from the ideal line (px)
//! - speed variance: population standard deviation of instantaneous speed (px/ms)
//! - jitter: cumulative turning angle between consecutive segments (degrees)
//! - efficiency: path length over straight-line anchor distance

use serde::{Deserialize, Serialize};

use crate::geometry::{turn_angle, Anchor, Line, Point};

/// Features computed from one trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub deviation: f64,
    pub speed_variance: f64,
    pub jitter: f64,
    pub efficiency: f64,
}

impl Metrics {
    /// Values reported for sequences too short to measure
    pub const NEUTRAL: Metrics = Metrics {
        deviation: 0.0,
        speed_variance: 0.0,
        jitter: 0.0,
        efficiency: 1.0,
    };
}

impl Default for Metrics {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Compute the feature vector for a sample sequence
///
/// Never fails: sequences of fewer than two samples yield [`Metrics::NEUTRAL`]
/// and degenerate geometry falls back to zero.
pub fn compute_metrics(samples: &[Point], start: &Anchor, end: &Anchor) -> Metrics {
    if samples.len() < 2 {
        return Metrics::NEUTRAL;
    }

    Metrics {
        deviation: deviation(samples, start, end),
        speed_variance: speed_variance(samples),
        jitter: jitter(samples),
        efficiency: efficiency(samples, start, end),
    }
}

fn deviation(samples: &[Point], start: &Anchor, end: &Anchor) -> f64 {
    let line = Line::through(start, end);
    let total: f64 = samples.iter().map(|p| line.distance(p.x, p.y)).sum();

    total / samples.len() as f64
}

fn speed_variance(samples: &[Point]) -> f64 {
    let speeds: Vec<f64> = samples
        .windows(2)
        .map(|pair| {
            let elapsed = (pair[1].t - pair[0].t).max(1.0);
            pair[0].distance_to(&pair[1]) / elapsed
        })
        .collect();

    if speeds.is_empty() {
        return 0.0;
    }

    let n = speeds.len() as f64;
    let mean = speeds.iter().sum::<f64>() / n;
    let variance = speeds.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    variance.max(0.0).sqrt()
}

fn jitter(samples: &[Point]) -> f64 {
    let turning: f64 = samples
        .windows(3)
        .map(|triple| {
            let incoming = triple[0].heading_to(&triple[1]);
            let outgoing = triple[1].heading_to(&triple[2]);
            turn_angle(incoming, outgoing)
        })
        .sum();

    turning.to_degrees()
}

fn efficiency(samples: &[Point], start: &Anchor, end: &Anchor) -> f64 {
    path_length(samples) / start.distance_to(end).max(1.0)
}

/// Sum of consecutive sample distances
pub fn path_length(samples: &[Point]) -> f64 {
    samples
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

/// Boundary check for externally captured samples
///
/// `compute_metrics` tolerates anything; callers that accept samples from
/// outside should reject malformed sequences here first.
pub fn validate_samples(samples: &[Point]) -> Result<(), SampleError> {
    let mut previous = None;
    for (index, sample) in samples.iter().enumerate() {
        validate_next(previous, sample, index)?;
        previous = Some(sample);
    }
    Ok(())
}

/// Check one sample appended at `index` after `previous`
pub fn validate_next(
    previous: Option<&Point>,
    sample: &Point,
    index: usize,
) -> Result<(), SampleError> {
    if !sample.is_finite() {
        return Err(SampleError::NonFinite { index });
    }
    if sample.t < 0.0 {
        return Err(SampleError::NegativeTimestamp { index, t: sample.t });
    }
    match previous {
        Some(previous) if sample.t < previous.t => Err(SampleError::OutOfOrder {
            index,
            t: sample.t,
            previous: previous.t,
        }),
        _ => Ok(()),
    }
}

/// Malformed sample sequences
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("Sample {index} has a non-finite coordinate or timestamp")]
    NonFinite { index: usize },

    #[error("Sample {index} has negative timestamp {t}ms")]
    NegativeTimestamp { index: usize, t: f64 },

    #[error("Sample {index} at {t}ms precedes the previous sample at {previous}ms")]
    OutOfOrder { index: usize, t: f64, previous: f64 },
}
