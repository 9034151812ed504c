// Comparison pipeline: two documents -> scores + matched segments.
//
// Similarity scoring and segment matching share nothing, so each runs on its
// own blocking worker and the two are joined. Both are CPU-bound; running
// them on the async executor directly would stall it.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::matching::matcher::{MatcherConfig, SegmentMatcher};
use crate::report::{ComparisonReport, DocumentSummary};
use crate::similarity::scores::{compute_scores, Metric};
use crate::text::document::Document;

/// What to compute for one comparison.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Metrics to score, in any order (reports list them in declaration order)
    pub metrics: Vec<Metric>,
    /// Window size for the n-gram metric
    pub ngram_size: usize,
    pub matcher: MatcherConfig,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
            ngram_size: 3,
            matcher: MatcherConfig::default(),
        }
    }
}

/// Compare `source` against `comparison` and assemble the report.
///
/// Invalid options (zero n-gram size with the n-gram metric requested, zero
/// match length) fail before any work is spawned.
pub async fn run(
    source: Arc<Document>,
    comparison: Arc<Document>,
    options: &CompareOptions,
) -> Result<ComparisonReport> {
    let matcher = SegmentMatcher::new(options.matcher.clone())?;
    if options.metrics.contains(&Metric::NGram) && options.ngram_size == 0 {
        anyhow::bail!("n-gram size must be at least 1, got 0");
    }

    let started = Instant::now();
    info!(
        source = %source.label,
        comparison = %comparison.label,
        source_tokens = source.tokens.len(),
        comparison_tokens = comparison.tokens.len(),
        "Starting comparison"
    );

    let scoring = {
        let (a, b) = (Arc::clone(&source), Arc::clone(&comparison));
        let metrics = options.metrics.clone();
        let ngram_size = options.ngram_size;
        tokio::task::spawn_blocking(move || {
            compute_scores(&a.tokens, &b.tokens, ngram_size, &metrics)
        })
    };

    let matching = {
        let (a, b) = (Arc::clone(&source), Arc::clone(&comparison));
        tokio::task::spawn_blocking(move || matcher.find_matches(&a.text, &b.text))
    };

    let (scores, matches) = tokio::try_join!(scoring, matching)
        .context("comparison worker panicked")?;
    let scores = scores?;

    info!(
        metrics = scores.len(),
        best = ?scores.best(),
        segments = matches.len(),
        matched_chars = matches.matched_chars(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Comparison complete"
    );

    Ok(ComparisonReport {
        source: DocumentSummary::from(source.as_ref()),
        comparison: DocumentSummary::from(comparison.as_ref()),
        ngram_size: options.ngram_size,
        min_match_len: options.matcher.min_match_len,
        scores,
        matches,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}
