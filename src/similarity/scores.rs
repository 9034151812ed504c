// Named similarity scores and the "best metric" rule.
//
// Metrics are a closed enumeration rather than free-form strings. Declaration
// order matters: it is the iteration order of `SimilarityScores` and the
// tie-break when two metrics report the same score.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::metrics::{cosine_similarity, jaccard_similarity, ngram_similarity};
use crate::text::ngram::ngrams;

/// A similarity metric the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Cosine Similarity")]
    Cosine,
    #[serde(rename = "Jaccard Similarity")]
    Jaccard,
    #[serde(rename = "N-gram Similarity")]
    NGram,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cosine, Metric::Jaccard, Metric::NGram];

    /// The exact display name reports render verbatim.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cosine => "Cosine Similarity",
            Metric::Jaccard => "Jaccard Similarity",
            Metric::NGram => "N-gram Similarity",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coarse reading of a similarity score, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl SimilarityLevel {
    /// Determine the level from a score in [0, 1]. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => SimilarityLevel::VeryHigh,
            s if s >= 0.5 => SimilarityLevel::High,
            s if s >= 0.25 => SimilarityLevel::Moderate,
            _ => SimilarityLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLevel::Low => "Low",
            SimilarityLevel::Moderate => "Moderate",
            SimilarityLevel::High => "High",
            SimilarityLevel::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scores for the metrics that were computed in one comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScores {
    scores: BTreeMap<Metric, f64>,
}

impl SimilarityScores {
    /// Record a metric's score, clamped to [0, 1] (NaN counts as 0.0).
    ///
    /// Scores are write-once: a metric that already has a score keeps it.
    pub fn insert(&mut self, metric: Metric, score: f64) {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        self.scores.entry(metric).or_insert(score);
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.scores.get(&metric).copied()
    }

    /// Scores in metric declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.scores.iter().map(|(m, s)| (*m, *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The highest-scoring metric. On a tie the earlier-declared metric wins.
    pub fn best(&self) -> Option<(Metric, f64)> {
        self.iter().fold(None, |best, (metric, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((metric, score)),
        })
    }

    /// Unweighted mean of the computed scores, 0.0 when none were computed.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }
}

/// Compute the requested metrics for two token sequences.
///
/// N-grams of `ngram_size` tokens are only generated when the n-gram metric
/// is requested, so an invalid size is only an error in that case.
pub fn compute_scores<S: AsRef<str>>(
    a_tokens: &[S],
    b_tokens: &[S],
    ngram_size: usize,
    metrics: &[Metric],
) -> Result<SimilarityScores> {
    let a: Vec<&str> = a_tokens.iter().map(|t| t.as_ref()).collect();
    let b: Vec<&str> = b_tokens.iter().map(|t| t.as_ref()).collect();

    let mut scores = SimilarityScores::default();
    for &metric in metrics {
        let score = match metric {
            Metric::Cosine => cosine_similarity(&a, &b),
            Metric::Jaccard => jaccard_similarity(&a, &b),
            Metric::NGram => {
                let a_grams = ngrams(&a, ngram_size)?;
                let b_grams = ngrams(&b, ngram_size)?;
                ngram_similarity(&a_grams, &b_grams)
            }
        };
        scores.insert(metric, score);
    }

    Ok(scores)
}
