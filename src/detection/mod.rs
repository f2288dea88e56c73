//! Bot detection engine
//!
//! Pure functions from a sample sequence to metrics and from metrics to a
//! verdict. Nothing here holds a sample buffer between calls.

pub mod metrics;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::geometry::{Anchor, Point};

pub use metrics::{
    compute_metrics, path_length, validate_next, validate_samples, Metrics, SampleError,
};
pub use scoring::{classify, Classification, Confidence, Factor, Polarity, Signal, Verdict};

/// Metrics and the verdict derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub metrics: Metrics,
    pub classification: Classification,
}

/// Classifier bound to one immutable set of thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectoryClassifier {
    thresholds: Thresholds,
}

impl TrajectoryClassifier {
    /// Create a classifier using the given thresholds
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Get the thresholds in use
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Compute metrics for a (possibly partial) trajectory
    pub fn metrics(&self, samples: &[Point], start: &Anchor, end: &Anchor) -> Metrics {
        compute_metrics(samples, start, end)
    }

    /// Score already computed metrics
    pub fn classify(&self, metrics: &Metrics) -> Classification {
        classify(metrics, &self.thresholds)
    }

    /// Compute metrics and classify them in one step
    pub fn evaluate(&self, samples: &[Point], start: &Anchor, end: &Anchor) -> Evaluation {
        let metrics = self.metrics(samples, start, end);
        let classification = self.classify(&metrics);

        log::debug!(
            "Evaluated {} samples: deviation={:.2} speed_variance={:.3} jitter={:.1} efficiency={:.3} -> {} ({})",
            samples.len(),
            metrics.deviation,
            metrics.speed_variance,
            metrics.jitter,
            metrics.efficiency,
            classification.verdict,
            classification.human_score
        );

        Evaluation {
            metrics,
            classification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_course, BOT_DEMO, HUMAN_DEMO};

    #[test]
    fn test_bot_demo_is_bot() {
        let course = demo_course();
        let classifier = TrajectoryClassifier::default();
        let eval = classifier.evaluate(&BOT_DEMO, &course.start, &course.end);

        assert!(eval.metrics.deviation.abs() < 1e-9);
        assert!(eval.metrics.speed_variance.abs() < 1e-9);
        assert!(eval.metrics.jitter.abs() < 1e-9);
        assert!((eval.metrics.efficiency - 1.0).abs() < 1e-9);

        assert_eq!(eval.classification.verdict, Verdict::Bot);
        assert_eq!(eval.classification.human_score, 0);
        assert_eq!(eval.classification.factors.len(), 4);
    }

    #[test]
    fn test_human_demo_is_suspicious() {
        let course = demo_course();
        let classifier = TrajectoryClassifier::default();
        let eval = classifier.evaluate(&HUMAN_DEMO, &course.start, &course.end);

        assert!((eval.metrics.deviation - 2.611_111).abs() < 1e-4);
        assert!(eval.metrics.deviation < classifier.thresholds().deviation_human);
        assert!((eval.metrics.speed_variance - 0.128_985).abs() < 1e-4);
        assert!((eval.metrics.jitter - 213.401_8).abs() < 1e-2);
        assert!((eval.metrics.efficiency - 1.010_869).abs() < 1e-4);

        let classification = &eval.classification;
        assert_eq!(classification.human_score, 60);
        assert_eq!(classification.verdict, Verdict::Suspicious);
        assert_eq!(classification.confidence, Confidence::Medium);

        let signals: Vec<Signal> = classification.factors.iter().map(|f| f.signal).collect();
        assert_eq!(
            signals,
            vec![
                Signal::NaturalTremor,
                Signal::MicroCorrections,
                Signal::OptimalPath
            ]
        );
    }

    #[test]
    fn test_lenient_thresholds_pass_human_demo() {
        let course = demo_course();
        let classifier = TrajectoryClassifier::new(Thresholds::lenient());
        let eval = classifier.evaluate(&HUMAN_DEMO, &course.start, &course.end);

        // Efficiency 1.0109 now sits above the 1.01 bot cutoff
        assert_eq!(eval.classification.human_score, 80);
        assert_eq!(eval.classification.verdict, Verdict::Human);
    }
}
