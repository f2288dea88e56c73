//! Pathguard CLI - classify recorded drag gestures
//!
//! Usage:
//!   pathguard                                  # Evaluate the bundled demos
//!   pathguard samples.json [settings.json]     # Classify a recorded gesture
//!   pathguard --json samples.json              # JSON output
//!
//! A samples file is a JSON array of `{"x": .., "y": .., "t": ..}` objects.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pathguard::config::Settings;
use pathguard::demo::{demo_course, BOT_DEMO, HUMAN_DEMO};
use pathguard::detection::{validate_samples, Evaluation, Polarity};
use pathguard::geometry::Point;
use pathguard::synth::{PathSynthesizer, SynthConfig};
use pathguard::Challenge;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut json = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            _ => paths.push(arg),
        }
    }

    let result = match paths.as_slice() {
        [] => run_demos(json),
        [samples] => run_file(samples, None, json),
        [samples, settings] => run_file(samples, Some(settings.as_str()), json),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Usage: pathguard [--json] [samples.json [settings.json]]");
    println!();
    println!("Without arguments the bundled bot and human demos are evaluated.");
}

/// Classify a samples file, optionally with custom settings
fn run_file(
    samples_path: &str,
    settings_path: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let samples: Vec<Point> = serde_json::from_str(&std::fs::read_to_string(samples_path)?)?;
    validate_samples(&samples)?;

    if samples.len() < settings.gesture.min_samples {
        return Err(format!(
            "gesture too short: {} samples, need at least {}",
            samples.len(),
            settings.gesture.min_samples
        )
        .into());
    }

    let mut challenge = Challenge::new(settings);
    let evaluation = challenge.evaluate(&samples);

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(samples_path, samples.len(), &evaluation);
    }

    Ok(())
}

/// Evaluate the bundled demos plus two freshly synthesized gestures
fn run_demos(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let course = demo_course();
    let mut synth = PathSynthesizer::new(SynthConfig::default());

    let runs: Vec<(&str, Vec<Point>)> = vec![
        ("bot demo", BOT_DEMO.to_vec()),
        ("human demo", HUMAN_DEMO.to_vec()),
        ("synthetic robotic", PathSynthesizer::robotic(&course.start, &course.end, 24, 16)),
        ("synthetic humanized", synth.humanized(&course.start, &course.end, 24)),
    ];

    let mut challenge = Challenge::default();

    if json {
        let evaluations: Vec<serde_json::Value> = runs
            .iter()
            .map(|(name, samples)| {
                serde_json::json!({
                    "name": name,
                    "evaluation": challenge.evaluate(samples),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&evaluations)?);
        return Ok(());
    }

    println!("Pathguard - Mouse Trajectory Bot Detection");
    println!("==========================================");
    println!();
    println!(
        "Course: ({}, {}) -> ({}, {})",
        course.start.x, course.start.y, course.end.x, course.end.y
    );
    println!();

    for (name, samples) in &runs {
        let evaluation = challenge.evaluate(samples);
        print_evaluation(name, samples.len(), &evaluation);
        println!();
    }

    Ok(())
}

fn print_evaluation(name: &str, sample_count: usize, evaluation: &Evaluation) {
    let metrics = &evaluation.metrics;
    let classification = &evaluation.classification;

    println!("{name} ({sample_count} samples)");
    println!("  - Deviation:      {:.2} px", metrics.deviation);
    println!("  - Speed variance: {:.3} px/ms", metrics.speed_variance);
    println!("  - Jitter:         {:.1} deg", metrics.jitter);
    println!("  - Efficiency:     {:.3}", metrics.efficiency);
    println!(
        "  Verdict: {} (score {}, {:?} confidence)",
        classification.verdict.label().to_uppercase(),
        classification.human_score,
        classification.confidence
    );

    for factor in &classification.factors {
        let marker = match factor.polarity {
            Polarity::Bot => "x",
            Polarity::Human => "+",
        };
        println!("    [{marker}] {}", factor.message);
    }
}
