//! Pathguard - mouse-trajectory bot detection
//!
//! This library scores drag-the-line CAPTCHA gestures: the user drags from
//! a start anchor to an end anchor and the recorded pointer path is reduced
//! to four features (deviation, speed variance, jitter, efficiency) which a
//! rule-based scorer turns into a human-likelihood score and verdict.
//!
//! ## Layout
//!
//! The `detection` module is a pure core with no state between calls. The
//! `capture` module owns the mutable sample buffer and gates gestures on the
//! course anchors. [`Challenge`] ties the two together for one challenge.

pub mod capture;
pub mod config;
pub mod demo;
pub mod detection;
pub mod geometry;
pub mod synth;

use crate::capture::{GestureError, GestureRecorder, LiveReading};
use crate::config::{ConfigError, HumanThresholds, Settings};
use crate::detection::{Evaluation, TrajectoryClassifier};
use crate::geometry::Point;

/// One drag-the-line challenge instance
pub struct Challenge {
    settings: Settings,
    classifier: TrajectoryClassifier,
    recorder: GestureRecorder,
    last_evaluation: Option<Evaluation>,
}

impl Challenge {
    /// Create a new challenge with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            classifier: TrajectoryClassifier::new(settings.thresholds),
            recorder: GestureRecorder::new(settings.course, settings.gesture),
            last_evaluation: None,
            settings,
        }
    }

    /// Pointer pressed
    pub fn pointer_down(&mut self, x: f64, y: f64, timestamp_ms: f64) -> Result<(), GestureError> {
        self.recorder.pointer_down(x, y, timestamp_ms)
    }

    /// Pointer moved; may yield a live progress reading
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        timestamp_ms: f64,
    ) -> Result<Option<LiveReading>, GestureError> {
        self.recorder.pointer_move(x, y, timestamp_ms)
    }

    /// Pointer released; evaluates the finished gesture
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        timestamp_ms: f64,
    ) -> Result<Evaluation, GestureError> {
        let samples = self.recorder.pointer_up(x, y, timestamp_ms)?;
        Ok(self.evaluate(&samples))
    }

    /// Evaluate an externally captured trajectory against this course
    pub fn evaluate(&mut self, samples: &[Point]) -> Evaluation {
        let course = &self.settings.course;
        let evaluation = self.classifier.evaluate(samples, &course.start, &course.end);

        log::info!(
            "Verdict: {} (score {}, {} factors)",
            evaluation.classification.verdict,
            evaluation.classification.human_score,
            evaluation.classification.factors.len()
        );

        self.last_evaluation = Some(evaluation.clone());
        evaluation
    }

    /// Replace the user-adjustable cutoffs, as a settings panel would.
    ///
    /// Invalid overrides are rejected and the current thresholds stay in effect.
    pub fn apply_human_overrides(&mut self, overrides: HumanThresholds) -> Result<(), ConfigError> {
        let candidate = self.settings.thresholds.with_human_overrides(overrides);
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected threshold overrides: {e}");
            return Err(e);
        }

        self.settings.thresholds = candidate;
        self.classifier = TrajectoryClassifier::new(candidate);
        Ok(())
    }

    /// Abandon the gesture in progress and forget the last verdict
    pub fn reset(&mut self) {
        self.recorder.reset();
        self.last_evaluation = None;
    }

    /// Settings in effect, including any applied overrides
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The most recent evaluation, if any
    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    /// The gesture recorder
    pub fn recorder(&self) -> &GestureRecorder {
        &self.recorder
    }

    pub fn classifier(&self) -> &TrajectoryClassifier {
        &self.classifier
    }
}

impl Default for Challenge {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
