//! Similarity command handler.
//!
//! Orchestrates: decode both images -> engine report -> render -> threshold verdict.

use super::load_image;
use crate::commands::{OutputFormat, SimilarityArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use imgcompare::{ComparisonEngine, SimilarityReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    image_a: String,
    image_b: String,
    threshold: f64,
    similar: bool,
    #[serde(flatten)]
    report: &'a SimilarityReport,
}

/// Execute the similarity command.
///
/// Fails with `BelowThreshold` when the score is under the threshold, so the
/// process exit status reflects the verdict.
pub fn execute(config: &CliConfig, args: &SimilarityArgs) -> CliResult<()> {
    let mut engine_config = config.engine.clone();
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CliError::invalid_argument(format!(
                "threshold must be within [0, 1], got {threshold}"
            )));
        }
        engine_config.similarity_threshold = threshold;
    }
    if let Some(tolerance) = args.tolerance {
        engine_config.tolerance = tolerance;
    }
    let threshold = engine_config.similarity_threshold;
    let tolerance = engine_config.tolerance;

    let a = load_image(&args.image_a)?;
    let b = load_image(&args.image_b)?;
    let report = ComparisonEngine::new(engine_config).compare(&a, &b)?;
    let similar = report.is_similar(threshold);

    match args.format {
        OutputFormat::Json => {
            let json = JsonReport {
                image_a: args.image_a.display().to_string(),
                image_b: args.image_b.display().to_string(),
                threshold,
                similar,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if !config.verbosity.is_quiet() {
                let verbose = config.verbosity.is_verbose();
                println!("{}", text_report(&report, threshold, tolerance, verbose));
            }
        }
    }

    if similar {
        Ok(())
    } else {
        Err(CliError::BelowThreshold {
            score: report.score,
            threshold,
        })
    }
}

fn text_report(report: &SimilarityReport, threshold: f64, tolerance: u8, verbose: bool) -> String {
    let mut lines = vec![
        format!("Image similarity: {:.2}%", report.percentage()),
        format!(
            "  Compared pixels: {} of {}",
            report.compared_pixels, report.total_pixels
        ),
        format!("  Differing pixels: {}", report.differing_pixels),
        format!("  Max channel diff: {}", report.max_channel_diff),
        format!(
            "  Within tolerance ({tolerance}): {:.2}%",
            report.within_tolerance_ratio * 100.0
        ),
    ];
    if verbose {
        lines.push(format!("  Threshold: {:.2}%", threshold * 100.0));
    }
    if report.is_identical() {
        lines.push("Images are identical over the compared area.".to_string());
    } else if report.is_similar(threshold) {
        lines.push(format!(
            "Images are sufficiently similar (>= {:.0}%).",
            threshold * 100.0
        ));
    }
    lines.join("\n")
}
