//! Challenge settings and detection thresholds
//!
//! Defines all configurable options for a drag-the-line challenge.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Anchor;

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Detection cutoffs
    pub thresholds: Thresholds,
    /// Start and end targets
    pub course: Course,
    /// Gesture gating
    pub gesture: GestureSettings,
}

impl Settings {
    /// Settings that flag borderline gestures more readily
    pub fn strict_preset() -> Self {
        Self {
            thresholds: Thresholds::strict(),
            course: Course {
                end_tolerance: 40.0,
                ..Default::default()
            },
            gesture: GestureSettings {
                min_samples: 8,
                ..Default::default()
            },
        }
    }

    /// Settings for touch screens and less steady users
    pub fn lenient_preset() -> Self {
        Self {
            thresholds: Thresholds::lenient(),
            course: Course {
                end_tolerance: 90.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.course.validate()?;

        if self.gesture.min_samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "gesture.min_samples must be at least 2, got {}",
                self.gesture.min_samples
            )));
        }
        if self.gesture.live_update_every == 0 {
            return Err(ConfigError::Invalid(
                "gesture.live_update_every must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// The eight feature cutoffs used by the scorer
///
/// Each feature has a `_bot` cutoff (values below it look robotic) and a
/// `_human` cutoff. Values between the two contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Mean distance from the ideal line below which the path is too perfect (px)
    pub deviation_bot: f64,
    /// Mean distance from the ideal line below which tremor looks natural (px)
    pub deviation_human: f64,
    /// Speed standard deviation below which speed is constant (px/ms)
    pub speed_variance_bot: f64,
    /// Speed standard deviation above which speed varies naturally (px/ms)
    pub speed_variance_human: f64,
    /// Cumulative turning below which there are no micro-movements (degrees)
    pub jitter_bot: f64,
    /// Cumulative turning above which micro-corrections look human (degrees)
    pub jitter_human: f64,
    /// Path efficiency below which the path is mathematically optimal
    pub efficiency_bot: f64,
    /// Path efficiency above which the path wanders naturally
    pub efficiency_human: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            deviation_bot: 2.0,
            deviation_human: 20.0,
            speed_variance_bot: 0.05,
            speed_variance_human: 0.2,
            jitter_bot: 10.0,
            jitter_human: 30.0,
            efficiency_bot: 1.02,
            efficiency_human: 1.08,
        }
    }
}

impl Thresholds {
    /// Harder to pass as human
    pub fn strict() -> Self {
        Self {
            deviation_bot: 3.0,
            deviation_human: 15.0,
            speed_variance_bot: 0.08,
            speed_variance_human: 0.3,
            jitter_bot: 15.0,
            jitter_human: 45.0,
            efficiency_bot: 1.03,
            efficiency_human: 1.1,
        }
    }

    /// Easier to pass as human
    pub fn lenient() -> Self {
        Self {
            deviation_bot: 1.0,
            deviation_human: 30.0,
            speed_variance_bot: 0.02,
            speed_variance_human: 0.15,
            jitter_bot: 5.0,
            jitter_human: 20.0,
            efficiency_bot: 1.01,
            efficiency_human: 1.05,
        }
    }

    /// Return a copy with the user-adjustable `_human` cutoffs replaced
    pub fn with_human_overrides(self, overrides: HumanThresholds) -> Self {
        Self {
            deviation_human: overrides.deviation.unwrap_or(self.deviation_human),
            speed_variance_human: overrides
                .speed_variance
                .unwrap_or(self.speed_variance_human),
            jitter_human: overrides.jitter.unwrap_or(self.jitter_human),
            efficiency_human: overrides.efficiency.unwrap_or(self.efficiency_human),
            ..self
        }
    }

    /// Check that every cutoff is a finite, non-negative number
    ///
    /// Inverted or zero-width bands are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("deviation_bot", self.deviation_bot),
            ("deviation_human", self.deviation_human),
            ("speed_variance_bot", self.speed_variance_bot),
            ("speed_variance_human", self.speed_variance_human),
            ("jitter_bot", self.jitter_bot),
            ("jitter_human", self.jitter_human),
            ("efficiency_bot", self.efficiency_bot),
            ("efficiency_human", self.efficiency_human),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "thresholds.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        for (feature, bot, human) in [
            ("deviation", self.deviation_bot, self.deviation_human),
            ("speed_variance", self.speed_variance_bot, self.speed_variance_human),
            ("jitter", self.jitter_bot, self.jitter_human),
            ("efficiency", self.efficiency_bot, self.efficiency_human),
        ] {
            if bot > human {
                log::warn!("{feature} bot cutoff {bot} exceeds human cutoff {human}");
            }
        }

        Ok(())
    }
}

/// Settings-panel overrides for the `_human` cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanThresholds {
    pub deviation: Option<f64>,
    pub speed_variance: Option<f64>,
    pub jitter: Option<f64>,
    pub efficiency: Option<f64>,
}

/// Start and end targets of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Where the gesture must begin
    pub start: Anchor,
    /// Where the gesture should end
    pub end: Anchor,
    /// Maximum release distance from the end anchor, even outside its radius (px)
    pub end_tolerance: f64,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            start: Anchor::new(100.0, 200.0, 30.0),
            end: Anchor::new(700.0, 200.0, 30.0),
            end_tolerance: 60.0,
        }
    }
}

impl Course {
    /// Straight-line distance between the anchor centres
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Whether a release position counts as reaching the end
    pub fn accepts_release(&self, x: f64, y: f64) -> bool {
        let distance = self.end.distance_to_xy(x, y);
        distance <= self.end.radius || distance <= self.end_tolerance
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, anchor) in [("start", &self.start), ("end", &self.end)] {
            if !anchor.x.is_finite() || !anchor.y.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "course.{name} must have finite coordinates"
                )));
            }
            if !anchor.radius.is_finite() || anchor.radius <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "course.{name}.radius must be positive, got {}",
                    anchor.radius
                )));
            }
        }

        if !self.end_tolerance.is_finite() || self.end_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "course.end_tolerance must be non-negative, got {}",
                self.end_tolerance
            )));
        }

        Ok(())
    }
}

/// Gesture gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Gestures with fewer samples are rejected as too short
    pub min_samples: usize,
    /// Produce a live reading every this many samples
    pub live_update_every: usize,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            min_samples: 5,
            live_update_every: 5,
        }
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.thresholds.deviation_human, 20.0);
        assert_eq!(settings.gesture.min_samples, 5);
        assert_eq!(settings.course.length(), 600.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(Settings::strict_preset().validate().is_ok());
        assert!(Settings::lenient_preset().validate().is_ok());
        assert!(Thresholds::strict().deviation_bot > Thresholds::lenient().deviation_bot);
    }

    #[test]
    fn test_human_overrides() {
        let base = Thresholds::default();
        let tuned = base.with_human_overrides(HumanThresholds {
            jitter: Some(50.0),
            efficiency: Some(1.2),
            ..Default::default()
        });

        assert_eq!(tuned.jitter_human, 50.0);
        assert_eq!(tuned.efficiency_human, 1.2);
        assert_eq!(tuned.deviation_human, base.deviation_human);
        assert_eq!(tuned.jitter_bot, base.jitter_bot);
        // The original value is untouched
        assert_eq!(base.jitter_human, 30.0);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"thresholds": {"jitter_human": 42.0}, "gesture": {"min_samples": 10}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.thresholds.jitter_human, 42.0);
        assert_eq!(settings.thresholds.jitter_bot, 10.0);
        assert_eq!(settings.gesture.min_samples, 10);
        assert_eq!(settings.gesture.live_update_every, 5);
        assert_eq!(settings.course, Course::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let json = r#"{"thresholds": {"deviation_bot": -1.0}}"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_gesture_settings() {
        let mut settings = Settings::default();
        settings.gesture.min_samples = 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.gesture.live_update_every = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.course.end.radius = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_width_band_is_valid() {
        let thresholds = Thresholds {
            deviation_bot: 5.0,
            deviation_human: 5.0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_release_tolerance() {
        let course = Course::default();
        assert!(course.accepts_release(700.0, 200.0));
        assert!(course.accepts_release(655.0, 200.0));
        assert!(!course.accepts_release(600.0, 200.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/pathguard.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
