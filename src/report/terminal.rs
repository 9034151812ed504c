// Colored terminal output for comparison reports.

use colored::Colorize;

use super::{single_line, truncate_chars, ComparisonReport};
use crate::similarity::scores::SimilarityLevel;

/// Preview length for matched text when not running verbose.
const PREVIEW_CHARS: usize = 100;

/// Display a comparison report in the terminal.
///
/// With `full_text` set, matched segments are printed in full instead of
/// truncated previews.
pub fn display_report(report: &ComparisonReport, full_text: bool) {
    println!("\n{}", "=== Document Similarity Report ===".bold());
    println!(
        "  Source:     {} ({} chars, {} tokens)",
        report.source.label, report.source.chars, report.source.tokens
    );
    println!(
        "  Comparison: {} ({} chars, {} tokens)",
        report.comparison.label, report.comparison.chars, report.comparison.tokens
    );

    display_scores(report);
    display_matches(report, full_text);
}

fn display_scores(report: &ComparisonReport) {
    println!("\n{}", "Similarity scores".bold());

    if report.scores.is_empty() {
        println!("  {}", "No metrics computed.".dimmed());
        return;
    }

    let bar_width: usize = 20;
    for (metric, score) in report.scores.iter() {
        let filled = (score * bar_width as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled.min(bar_width)),
            "░".repeat(bar_width - filled.min(bar_width))
        );
        let level = SimilarityLevel::from_score(score);
        println!(
            "  {:<20} {} {:>6.2}%  {}",
            metric.name(),
            bar.cyan(),
            score * 100.0,
            colorize_level(level),
        );
    }

    if let Some((metric, score)) = report.scores.best() {
        println!(
            "\n  Highest: {} ({:.2}%)",
            metric.name().bold(),
            score * 100.0
        );
    }
    if report.scores.len() > 1 {
        println!("  Average: {:.2}%", report.scores.mean() * 100.0);
    }
}

fn display_matches(report: &ComparisonReport, full_text: bool) {
    println!(
        "\n{}",
        format!(
            "Matched segments ({} found, min {} chars, {:.1}% of source)",
            report.matches.len(),
            report.min_match_len,
            report.source_coverage() * 100.0
        )
        .bold()
    );

    if report.matches.is_empty() {
        println!("  {}", "No shared passages found.".dimmed());
        return;
    }

    for (i, segment) in report.matches.iter().enumerate() {
        let text = single_line(&segment.source_text);
        let shown = if full_text {
            text
        } else {
            truncate_chars(&text, PREVIEW_CHARS)
        };
        println!(
            "  {:>3}. {} \"{}\"",
            i + 1,
            format!(
                "[src {}..{} | cmp {}..{}]",
                segment.source_start,
                segment.source_start + segment.len,
                segment.comparison_start,
                segment.comparison_start + segment.len
            )
            .dimmed(),
            shown,
        );
    }
}

/// Colorize a similarity level.
fn colorize_level(level: SimilarityLevel) -> colored::ColoredString {
    let label = level.as_str();
    match level {
        SimilarityLevel::VeryHigh => label.red().bold(),
        SimilarityLevel::High => label.bright_red(),
        SimilarityLevel::Moderate => label.yellow(),
        SimilarityLevel::Low => label.green(),
    }
}
