// Markdown report generation.
//
// Produces a standalone document: a header with both inputs, a score table,
// and every matched segment quoted in full.

use std::fmt::{self, Write};

use super::{single_line, ComparisonReport};
use crate::similarity::scores::{Metric, SimilarityLevel};

/// Render the report as Markdown.
pub fn generate(report: &ComparisonReport) -> String {
    let mut md = String::new();
    // fmt::Write for String never returns Err
    let _ = write_markdown(&mut md, report);
    md
}

fn write_markdown(md: &mut String, report: &ComparisonReport) -> fmt::Result {
    writeln!(md, "# Document Similarity Report\n")?;
    writeln!(md, "Generated: {}\n", report.generated_at)?;
    writeln!(
        md,
        "- **Source:** `{}` ({} chars, {} tokens)",
        report.source.label, report.source.chars, report.source.tokens
    )?;
    writeln!(
        md,
        "- **Comparison:** `{}` ({} chars, {} tokens)\n",
        report.comparison.label, report.comparison.chars, report.comparison.tokens
    )?;

    writeln!(md, "## Similarity Scores\n")?;
    if report.scores.is_empty() {
        writeln!(md, "_No metrics computed._\n")?;
    } else {
        writeln!(md, "| Metric | Score | Level |")?;
        writeln!(md, "|---|---:|---|")?;
        for (metric, score) in report.scores.iter() {
            let level = SimilarityLevel::from_score(score);
            writeln!(md, "| {metric} | {score:.4} | {level} |")?;
        }
        if let Some((metric, score)) = report.scores.best() {
            writeln!(md, "\nHighest: **{metric}** ({score:.4})")?;
        }
        if report.scores.len() > 1 {
            writeln!(md, "\nAverage: {:.4}", report.scores.mean())?;
        }
        if report.scores.get(Metric::NGram).is_some() {
            writeln!(md, "\nN-gram size: {}", report.ngram_size)?;
        }
        writeln!(md)?;
    }

    writeln!(md, "## Matched Segments\n")?;
    writeln!(
        md,
        "{} segment(s) of at least {} chars, covering {:.1}% of the source.\n",
        report.matches.len(),
        report.min_match_len,
        report.source_coverage() * 100.0
    )?;

    for (i, segment) in report.matches.iter().enumerate() {
        writeln!(
            md,
            "### {}. Source chars {}-{} / Comparison chars {}-{} ({} chars)\n",
            i + 1,
            segment.source_start,
            segment.source_start + segment.len,
            segment.comparison_start,
            segment.comparison_start + segment.len,
            segment.len
        )?;
        writeln!(md, "> {}\n", single_line(&segment.source_text))?;
        if segment.comparison_text != segment.source_text {
            writeln!(md, "Comparison text:\n")?;
            writeln!(md, "> {}\n", single_line(&segment.comparison_text))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::segment::{MatchSegment, MatchSet};
    use crate::report::DocumentSummary;
    use crate::similarity::scores::SimilarityScores;

    fn sample_report() -> ComparisonReport {
        let mut scores = SimilarityScores::default();
        scores.insert(Metric::Cosine, 0.91);
        scores.insert(Metric::Jaccard, 0.42);
        ComparisonReport {
            source: DocumentSummary {
                label: "a.txt".to_string(),
                chars: 40,
                tokens: 6,
            },
            comparison: DocumentSummary {
                label: "b.txt".to_string(),
                chars: 50,
                tokens: 7,
            },
            ngram_size: 3,
            min_match_len: 10,
            scores,
            matches: MatchSet::new(vec![MatchSegment {
                source_start: 0,
                comparison_start: 5,
                len: 20,
                source_text: "shared phrase\nacross".to_string(),
                comparison_text: "shared phrase\nacross".to_string(),
            }]),
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_markdown_contains_scores_and_segments() {
        let md = generate(&sample_report());
        assert!(md.contains("| Cosine Similarity | 0.9100 | Very High |"));
        assert!(md.contains("| Jaccard Similarity | 0.4200 | Moderate |"));
        assert!(!md.contains("N-gram Similarity"));
        assert!(md.contains("Highest: **Cosine Similarity**"));
        assert!(md.contains("> shared phrase across"));
        assert!(md.contains("covering 50.0% of the source"));
    }
}
