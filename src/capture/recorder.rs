//! Gesture recording
//!
//! Turns pointer down/move/up events into a sample sequence, gating the
//! start and end of the gesture on the course anchors.

use serde::{Deserialize, Serialize};

use crate::config::{Course, GestureSettings};
use crate::detection::{compute_metrics, validate_next, Metrics, SampleError};
use crate::geometry::Point;

/// Where the recorder is in a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    /// Waiting for a pointer-down on the start anchor
    Idle,
    /// Pointer is down and samples are being collected
    Drawing,
}

/// Progress readout produced while a gesture is in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveReading {
    pub sample_count: usize,
    pub metrics: Metrics,
}

/// Records one gesture at a time
#[derive(Debug, Clone)]
pub struct GestureRecorder {
    course: Course,
    settings: GestureSettings,
    phase: GesturePhase,
    /// Raw timestamp of the first sample; later samples are rebased on it
    origin_ms: f64,
    samples: Vec<Point>,
}

impl GestureRecorder {
    /// Create a recorder for the given course
    pub fn new(course: Course, settings: GestureSettings) -> Self {
        Self {
            course,
            settings,
            phase: GesturePhase::Idle,
            origin_ms: 0.0,
            samples: Vec::new(),
        }
    }

    /// Begin a gesture
    ///
    /// Only accepted within the start anchor's radius. Any previous buffer is
    /// discarded.
    pub fn pointer_down(&mut self, x: f64, y: f64, timestamp_ms: f64) -> Result<(), GestureError> {
        let first = Point::new(x, y, 0.0);
        if !first.is_finite() || !timestamp_ms.is_finite() {
            return Err(SampleError::NonFinite { index: 0 }.into());
        }

        let start = &self.course.start;
        if !start.contains(x, y) {
            return Err(GestureError::OutsideStart {
                distance: start.distance_to_xy(x, y),
                radius: start.radius,
            });
        }

        self.samples.clear();
        self.samples.push(first);
        self.origin_ms = timestamp_ms;
        self.phase = GesturePhase::Drawing;

        log::debug!("Gesture started at ({:.1}, {:.1})", x, y);
        Ok(())
    }

    /// Record a pointer movement
    ///
    /// Movements outside a gesture are ignored. Every `live_update_every`
    /// samples a [`LiveReading`] is returned.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        timestamp_ms: f64,
    ) -> Result<Option<LiveReading>, GestureError> {
        if self.phase != GesturePhase::Drawing {
            return Ok(None);
        }

        self.push_sample(x, y, timestamp_ms)?;

        let count = self.samples.len();
        if count.is_multiple_of(self.settings.live_update_every) {
            Ok(Some(LiveReading {
                sample_count: count,
                metrics: self.live_metrics(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Finish the gesture and hand back its samples
    ///
    /// The release must land within the end anchor's radius or the course's
    /// end tolerance, and the gesture must have at least `min_samples`
    /// samples. The recorder is idle afterwards either way.
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        timestamp_ms: f64,
    ) -> Result<Vec<Point>, GestureError> {
        if self.phase != GesturePhase::Drawing {
            return Err(GestureError::NotDrawing);
        }

        let pushed = self.push_sample(x, y, timestamp_ms);
        self.phase = GesturePhase::Idle;
        let samples = std::mem::take(&mut self.samples);
        pushed?;

        if !self.course.accepts_release(x, y) {
            let distance = self.course.end.distance_to_xy(x, y);
            log::warn!("Gesture released {:.1}px from the end anchor", distance);
            return Err(GestureError::MissedEnd {
                distance,
                tolerance: self.course.end.radius.max(self.course.end_tolerance),
            });
        }

        if samples.len() < self.settings.min_samples {
            log::warn!("Gesture too short: {} samples", samples.len());
            return Err(GestureError::TooShort {
                count: samples.len(),
                min: self.settings.min_samples,
            });
        }

        log::debug!("Gesture finished with {} samples", samples.len());
        Ok(samples)
    }

    /// Abandon any gesture in progress
    pub fn reset(&mut self) {
        self.samples.clear();
        self.phase = GesturePhase::Idle;
        self.origin_ms = 0.0;
    }

    /// Metrics over the samples collected so far
    pub fn live_metrics(&self) -> Metrics {
        compute_metrics(&self.samples, &self.course.start, &self.course.end)
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Samples of the gesture in progress
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    fn push_sample(&mut self, x: f64, y: f64, timestamp_ms: f64) -> Result<(), SampleError> {
        let point = Point::new(x, y, timestamp_ms - self.origin_ms);
        validate_next(self.samples.last(), &point, self.samples.len())?;

        self.samples.push(point);
        Ok(())
    }
}

/// Reasons a gesture is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    #[error("Gesture must start on the start anchor ({distance:.1}px away, radius {radius}px)")]
    OutsideStart { distance: f64, radius: f64 },

    #[error("No gesture in progress")]
    NotDrawing,

    #[error("Invalid sample: {0}")]
    InvalidSample(#[from] SampleError),

    #[error("Gesture ended {distance:.1}px from the end anchor (allowed {tolerance}px)")]
    MissedEnd { distance: f64, tolerance: f64 },

    #[error("Gesture too short: {count} samples, need at least {min}")]
    TooShort { count: usize, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> GestureRecorder {
        GestureRecorder::new(Course::default(), GestureSettings::default())
    }

    /// Drag along the course in `steps` moves, 50ms apart, from a page-clock origin
    fn drag(recorder: &mut GestureRecorder, steps: usize) -> Result<Vec<Point>, GestureError> {
        let origin = 12_000.0;
        recorder.pointer_down(100.0, 200.0, origin)?;
        for i in 1..steps {
            let x = 100.0 + 600.0 * i as f64 / steps as f64;
            recorder.pointer_move(x, 200.0 + (i % 3) as f64, origin + 50.0 * i as f64)?;
        }
        recorder.pointer_up(700.0, 200.0, origin + 50.0 * steps as f64)
    }

    #[test]
    fn test_full_gesture() {
        let mut rec = recorder();
        let samples = drag(&mut rec, 10).unwrap();

        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].t, 0.0);
        assert_eq!(samples[10].t, 500.0);
        assert_eq!(rec.phase(), GesturePhase::Idle);
        assert!(rec.samples().is_empty());
    }

    #[test]
    fn test_must_start_on_anchor() {
        let mut rec = recorder();
        let err = rec.pointer_down(300.0, 200.0, 0.0).unwrap_err();
        assert!(matches!(err, GestureError::OutsideStart { .. }));
        assert_eq!(rec.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_moves_outside_gesture_are_ignored() {
        let mut rec = recorder();
        assert_eq!(rec.pointer_move(200.0, 200.0, 10.0), Ok(None));
        assert!(rec.samples().is_empty());
    }

    #[test]
    fn test_up_without_down() {
        let mut rec = recorder();
        assert_eq!(rec.pointer_up(700.0, 200.0, 10.0), Err(GestureError::NotDrawing));
    }

    #[test]
    fn test_too_short() {
        let mut rec = recorder();
        // Down, two moves, up: 4 samples
        let err = drag(&mut rec, 3).unwrap_err();
        assert_eq!(err, GestureError::TooShort { count: 4, min: 5 });
        assert_eq!(rec.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_minimum_length_accepted() {
        let mut rec = recorder();
        assert_eq!(drag(&mut rec, 4).unwrap().len(), 5);
    }

    #[test]
    fn test_missed_end() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();
        for i in 1..8 {
            rec.pointer_move(100.0 + 50.0 * i as f64, 200.0, 20.0 * i as f64)
                .unwrap();
        }
        let err = rec.pointer_up(450.0, 200.0, 200.0).unwrap_err();
        assert!(matches!(err, GestureError::MissedEnd { .. }));
        assert!(rec.samples().is_empty());
    }

    #[test]
    fn test_release_within_tolerance() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();
        for i in 1..6 {
            rec.pointer_move(100.0 + 100.0 * i as f64, 200.0, 30.0 * i as f64)
                .unwrap();
        }
        // 50px short of the end centre: outside the 30px radius, inside the 60px tolerance
        assert!(rec.pointer_up(650.0, 200.0, 200.0).is_ok());
    }

    #[test]
    fn test_live_readings() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();

        let mut readings = Vec::new();
        for i in 1..10 {
            let x = 100.0 + 20.0 * i as f64;
            if let Some(reading) = rec.pointer_move(x, 200.0, 16.0 * i as f64).unwrap() {
                readings.push(reading);
            }
        }

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].sample_count, 5);
        assert_eq!(readings[1].sample_count, 10);
        assert!(readings[1].metrics.deviation.abs() < 1e-9);
    }

    #[test]
    fn test_out_of_order_sample_rejected() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 1000.0).unwrap();
        rec.pointer_move(120.0, 200.0, 1050.0).unwrap();

        let err = rec.pointer_move(140.0, 200.0, 1040.0).unwrap_err();
        assert_eq!(
            err,
            GestureError::InvalidSample(SampleError::OutOfOrder {
                index: 2,
                t: 40.0,
                previous: 50.0
            })
        );
        // The gesture keeps its valid samples
        assert_eq!(rec.samples().len(), 2);
        assert_eq!(rec.phase(), GesturePhase::Drawing);
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();
        let err = rec.pointer_move(f64::NAN, 200.0, 10.0).unwrap_err();
        assert_eq!(err, GestureError::InvalidSample(SampleError::NonFinite { index: 1 }));

        assert!(rec.pointer_down(f64::INFINITY, 200.0, 0.0).is_err());
    }

    #[test]
    fn test_new_gesture_replaces_old_buffer() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();
        rec.pointer_move(150.0, 210.0, 40.0).unwrap();

        rec.pointer_down(105.0, 195.0, 500.0).unwrap();
        assert_eq!(rec.samples(), &[Point::new(105.0, 195.0, 0.0)]);
    }

    #[test]
    fn test_reset() {
        let mut rec = recorder();
        rec.pointer_down(100.0, 200.0, 0.0).unwrap();
        rec.pointer_move(150.0, 210.0, 40.0).unwrap();
        rec.reset();

        assert_eq!(rec.phase(), GesturePhase::Idle);
        assert!(rec.samples().is_empty());
        assert_eq!(rec.live_metrics(), Metrics::NEUTRAL);
    }
}
