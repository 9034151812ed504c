// Matched segments: the concrete overlapping text spans between two documents.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A span of the source text and an equal-length span of the comparison text
/// that match character for character.
///
/// Offsets and length count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSegment {
    pub source_start: usize,
    pub comparison_start: usize,
    pub len: usize,
    /// The matched span as it appears in the source document
    pub source_text: String,
    /// The matched span as it appears in the comparison document
    pub comparison_text: String,
}

impl MatchSegment {
    pub fn source_range(&self) -> Range<usize> {
        self.source_start..self.source_start + self.len
    }

    pub fn comparison_range(&self) -> Range<usize> {
        self.comparison_start..self.comparison_start + self.len
    }
}

/// All segments found in one comparison, in the order they were discovered
/// (ascending source position).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    segments: Vec<MatchSegment>,
}

impl MatchSet {
    /// Segments must be in ascending source order, must not overlap on either
    /// side, and each text must be `len` chars long.
    pub fn new(segments: Vec<MatchSegment>) -> Self {
        debug_assert!(segments.iter().all(|s| {
            s.source_text.chars().count() == s.len && s.comparison_text.chars().count() == s.len
        }));
        debug_assert!(segments
            .windows(2)
            .all(|w| w[0].source_range().end <= w[1].source_start));
        Self { segments }
    }

    pub fn segments(&self) -> &[MatchSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total matched characters (the same on both sides).
    pub fn matched_chars(&self) -> usize {
        self.segments.iter().map(|s| s.len).sum()
    }

    /// Fraction of a document of `total_chars` characters covered by matches.
    pub fn coverage(&self, total_chars: usize) -> f64 {
        if total_chars == 0 {
            return 0.0;
        }
        (self.matched_chars() as f64 / total_chars as f64).min(1.0)
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a MatchSegment;
    type IntoIter = std::slice::Iter<'a, MatchSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(source_start: usize, text: &str) -> MatchSegment {
        MatchSegment {
            source_start,
            comparison_start: 0,
            len: text.chars().count(),
            source_text: text.to_string(),
            comparison_text: text.to_string(),
        }
    }

    #[test]
    fn test_coverage_is_capped() {
        let set = MatchSet::new(vec![segment(0, "abcd"), segment(4, "efgh")]);
        assert_eq!(set.matched_chars(), 8);
        assert_eq!(set.coverage(16), 0.5);
        assert_eq!(set.coverage(4), 1.0);
        assert_eq!(set.coverage(0), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_len_must_match_text() {
        let mut bad = segment(0, "abcd");
        bad.len = 10;
        MatchSet::new(vec![bad]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_overlapping_source_spans_rejected() {
        MatchSet::new(vec![segment(0, "abcd"), segment(2, "cdef")]);
    }
}
