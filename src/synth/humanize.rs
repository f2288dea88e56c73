//! Human drag simulation
//!
//! Generates trajectories with the tremor, speed changes and small
//! detours a hand produces, alongside perfectly scripted ones.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::SynthConfig;
use crate::geometry::{Anchor, Point};

/// Micro-pause duration range in ms
const MIN_MICRO_PAUSE_MS: u64 = 40;
const MAX_MICRO_PAUSE_MS: u64 = 160;

/// Generator for synthetic drag gestures
pub struct PathSynthesizer {
    rng: StdRng,
    config: SynthConfig,
}

impl Default for PathSynthesizer {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}

impl PathSynthesizer {
    /// Create a synthesizer seeded from the OS
    pub fn new(config: SynthConfig) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Create a reproducible synthesizer
    pub fn seeded(config: SynthConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Straight, evenly spaced and evenly timed path with `steps` segments
    pub fn robotic(start: &Anchor, end: &Anchor, steps: usize, interval_ms: u64) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let progress = i as f64 / steps as f64;
                Point::new(
                    start.x + (end.x - start.x) * progress,
                    start.y + (end.y - start.y) * progress,
                    (i as u64 * interval_ms) as f64,
                )
            })
            .collect()
    }

    /// Hand-drawn looking path with `steps` segments
    ///
    /// Starts exactly on `start` at t = 0 and ends exactly on `end`.
    pub fn humanized(&mut self, start: &Anchor, end: &Anchor, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = dx.hypot(dy);

        // Unit normal to the course; zero for a degenerate course
        let (nx, ny) = if length > 0.0 {
            (-dy / length, dx / length)
        } else {
            (0.0, 0.0)
        };

        let bow = self.bow();
        let mut points = Vec::with_capacity(steps + 1);
        points.push(Point::new(start.x, start.y, 0.0));

        let mut t = 0u64;
        for i in 1..=steps {
            let eased = ease_in_out(i as f64 / steps as f64);
            let mut x = start.x + dx * eased;
            let mut y = start.y + dy * eased;

            if i < steps {
                let offset = self.gaussian_offset(self.config.tremor_px) + bow * (PI * eased).sin();
                x += nx * offset;
                y += ny * offset;
            }

            t += self.sample_interval();
            points.push(Point::new(x, y, t as f64));
        }

        points
    }

    /// Time until the next sample, with variance and occasional hesitation
    pub fn sample_interval(&mut self) -> u64 {
        let mut interval = humanize_delay(
            &mut self.rng,
            self.config.interval_ms,
            self.config.timing_variance_percent,
        );

        if self.should_micro_pause() {
            interval += self.rng.gen_range(MIN_MICRO_PAUSE_MS..=MAX_MICRO_PAUSE_MS);
        }

        interval
    }

    fn should_micro_pause(&mut self) -> bool {
        self.rng.gen::<f64>() < self.config.micro_pause_probability
    }

    /// Signed sideways bow for a whole path
    fn bow(&mut self) -> f64 {
        let (min, max) = (self.config.bow_px_min, self.config.bow_px_max);
        if max <= 0.0 {
            return 0.0;
        }

        let magnitude = if max > min {
            self.rng.gen_range(min..max)
        } else {
            max
        };

        if self.rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Gaussian-like offset bounded by `max_offset`
    fn gaussian_offset(&mut self, max_offset: f64) -> f64 {
        if max_offset == 0.0 {
            return 0.0;
        }

        // Simple approximation using sum of uniform randoms
        let sum: f64 = (0..3).map(|_| self.rng.gen::<f64>() - 0.5).sum();

        sum * max_offset * 0.67
    }
}

/// Humanize a delay with variance, never dropping below 1ms
fn humanize_delay(rng: &mut StdRng, base_ms: u64, variance_percent: u32) -> u64 {
    if variance_percent == 0 {
        return base_ms.max(1);
    }

    let variance = (base_ms as f64 * variance_percent as f64 / 100.0) as i64;
    let offset = rng.gen_range(-variance..=variance);

    (base_ms as i64 + offset).max(1) as u64
}

/// Slow start, fast middle, slow finish
fn ease_in_out(progress: f64) -> f64 {
    0.5 - 0.5 * (PI * progress).cos()
}
