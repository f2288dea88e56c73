//! Rule-based human-likelihood scoring
//!
//! Every feature falls in one of three exclusive bands: robotic, neutral
//! or human. Robotic and human bands move the score; the neutral band
//! between the two cutoffs contributes nothing.

use serde::{Deserialize, Serialize};

use super::Metrics;
use crate::config::Thresholds;

/// Score every trajectory starts from
pub const BASE_SCORE: i32 = 50;

/// Scores below this are bots
pub const BOT_SCORE_CEILING: u32 = 30;

/// Scores at or above this are human
pub const HUMAN_SCORE_FLOOR: u32 = 70;

/// Final three-way verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Bot,
    Suspicious,
    Human,
}

impl Verdict {
    /// Map a clamped score onto a verdict
    pub fn from_score(score: u32) -> Self {
        if score < BOT_SCORE_CEILING {
            Verdict::Bot
        } else if score < HUMAN_SCORE_FLOOR {
            Verdict::Suspicious
        } else {
            Verdict::Human
        }
    }

    /// How sure the scorer is of this verdict
    pub fn confidence(&self) -> Confidence {
        match self {
            Verdict::Bot | Verdict::Human => Confidence::High,
            Verdict::Suspicious => Confidence::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Bot => "bot",
            Verdict::Suspicious => "suspicious",
            Verdict::Human => "human",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Which way a factor pushed the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Bot,
    Human,
}

/// Individual observations the scorer can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    LineTooPerfect,
    NaturalTremor,
    ConstantSpeed,
    NaturalSpeedVariation,
    NoMicroMovements,
    MicroCorrections,
    OptimalPath,
    NaturalInefficiency,
}

impl Signal {
    /// Score adjustment applied when this signal fires
    pub fn weight(&self) -> i32 {
        match self {
            Signal::LineTooPerfect => -25,
            Signal::NaturalTremor => 15,
            Signal::ConstantSpeed => -20,
            Signal::NaturalSpeedVariation => 10,
            Signal::NoMicroMovements => -15,
            Signal::MicroCorrections => 15,
            Signal::OptimalPath => -20,
            Signal::NaturalInefficiency => 10,
        }
    }

    pub fn polarity(&self) -> Polarity {
        if self.weight() < 0 {
            Polarity::Bot
        } else {
            Polarity::Human
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Signal::LineTooPerfect => "Line too perfect - lacks human tremor",
            Signal::NaturalTremor => "Natural hand tremor detected",
            Signal::ConstantSpeed => "Constant speed - robotic movement",
            Signal::NaturalSpeedVariation => "Natural speed variations",
            Signal::NoMicroMovements => "No micro-movements detected",
            Signal::MicroCorrections => "Human-like micro-corrections",
            Signal::OptimalPath => "Mathematically optimal path",
            Signal::NaturalInefficiency => "Natural path inefficiency",
        }
    }
}

/// One explanation entry in a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub signal: Signal,
    pub polarity: Polarity,
    pub message: String,
}

impl From<Signal> for Factor {
    fn from(signal: Signal) -> Self {
        Self {
            signal,
            polarity: signal.polarity(),
            message: signal.message().to_string(),
        }
    }
}

/// Result of scoring one trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Human likelihood, clamped to 0..=100
    pub human_score: u32,
    pub verdict: Verdict,
    pub confidence: Confidence,
    /// Explanations in evaluation order: deviation, speed, jitter, efficiency
    pub factors: Vec<Factor>,
}

/// Score a feature vector against a set of cutoffs
pub fn classify(metrics: &Metrics, thresholds: &Thresholds) -> Classification {
    let signals = [
        deviation_signal(metrics.deviation, thresholds),
        speed_signal(metrics.speed_variance, thresholds),
        jitter_signal(metrics.jitter, thresholds),
        efficiency_signal(metrics.efficiency, thresholds),
    ];

    let mut score = BASE_SCORE;
    let mut factors = Vec::with_capacity(signals.len());

    for signal in signals.into_iter().flatten() {
        score += signal.weight();
        factors.push(Factor::from(signal));
    }

    let human_score = score.clamp(0, 100) as u32;
    let verdict = Verdict::from_score(human_score);

    Classification {
        human_score,
        verdict,
        confidence: verdict.confidence(),
        factors,
    }
}

fn deviation_signal(deviation: f64, thresholds: &Thresholds) -> Option<Signal> {
    if deviation < thresholds.deviation_bot {
        Some(Signal::LineTooPerfect)
    } else if deviation < thresholds.deviation_human {
        Some(Signal::NaturalTremor)
    } else {
        None
    }
}

fn speed_signal(speed_variance: f64, thresholds: &Thresholds) -> Option<Signal> {
    if speed_variance < thresholds.speed_variance_bot {
        Some(Signal::ConstantSpeed)
    } else if speed_variance > thresholds.speed_variance_human {
        Some(Signal::NaturalSpeedVariation)
    } else {
        None
    }
}

fn jitter_signal(jitter: f64, thresholds: &Thresholds) -> Option<Signal> {
    if jitter < thresholds.jitter_bot {
        Some(Signal::NoMicroMovements)
    } else if jitter > thresholds.jitter_human {
        Some(Signal::MicroCorrections)
    } else {
        None
    }
}

fn efficiency_signal(efficiency: f64, thresholds: &Thresholds) -> Option<Signal> {
    if efficiency < thresholds.efficiency_bot {
        Some(Signal::OptimalPath)
    } else if efficiency > thresholds.efficiency_human {
        Some(Signal::NaturalInefficiency)
    } else {
        None
    }
}
