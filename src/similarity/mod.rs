// Similarity calculation: cosine, Jaccard, and n-gram set metrics.

pub mod metrics;
pub mod scores;
