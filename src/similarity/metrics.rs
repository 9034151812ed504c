// Similarity metrics over sequences of comparable units (tokens or n-grams).
//
// Cosine works on frequency vectors, so repeated units count. Jaccard and
// n-gram similarity work on distinct sets, so they don't. All three return
// 0.0 for "no evidence": empty inputs never score as a perfect match.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Cosine similarity between the count vectors of two sequences.
///
/// The vocabulary is the union of distinct units from both sides. Returns 0.0
/// when either side is empty (zero vector).
pub fn cosine_similarity<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let counts_a = frequencies(a);
    let counts_b = frequencies(b);

    // Only shared units contribute to the dot product
    let dot: f64 = counts_a
        .iter()
        .filter_map(|(unit, &ca)| counts_b.get(unit).map(|&cb| ca * cb))
        .sum();

    let mag_a = counts_a.values().map(|c| c * c).sum::<f64>().sqrt();
    let mag_b = counts_b.values().map(|c| c * c).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        return 0.0;
    }

    (dot / denom).clamp(0.0, 1.0)
}

/// Jaccard similarity: |A ∩ B| / |A ∪ B| over the distinct units of each side.
///
/// Two empty sets score 0.0, not 1.0.
pub fn jaccard_similarity<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    let set_a: HashSet<&T> = a.iter().collect();
    let set_b: HashSet<&T> = b.iter().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Set similarity over two n-gram sequences the caller already generated.
pub fn ngram_similarity<T: Hash + Eq>(a_ngrams: &[T], b_ngrams: &[T]) -> f64 {
    jaccard_similarity(a_ngrams, b_ngrams)
}

fn frequencies<T: Hash + Eq>(units: &[T]) -> HashMap<&T, f64> {
    let mut counts = HashMap::new();
    for unit in units {
        *counts.entry(unit).or_insert(0.0) += 1.0;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaccard_example() {
        let a = ["the", "quick", "fox"];
        let b = ["the", "slow", "fox"];
        assert!((jaccard_similarity(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_both_empty_is_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_jaccard_ignores_duplicates() {
        let a = ["x", "x", "x", "y"];
        let b = ["x", "y"];
        assert!((jaccard_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_counts_repeats() {
        // a = (2, 1) over {x, y}, b = (1, 1)
        let a = ["x", "x", "y"];
        let b = ["x", "y"];
        let expected = 3.0 / (5f64.sqrt() * 2f64.sqrt());
        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_empty_side_is_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(cosine_similarity(&empty, &["a"]), 0.0);
        assert_eq!(cosine_similarity(&["a"], &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_identical_scores_one() {
        let a = ["alpha", "beta", "beta", "gamma"];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert!((jaccard_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ngram_similarity_is_set_based() {
        let a = vec!["a b".to_string(), "b c".to_string()];
        let b = vec!["b c".to_string(), "c d".to_string()];
        assert!((ngram_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }
}
