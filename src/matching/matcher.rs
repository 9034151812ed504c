// Greedy segment matcher.
//
// Finds the character spans two texts share, longest-first at each source
// position:
//
// 1. Every window of `min_match_len` chars in the comparison text is indexed
//    (the "anchor" index), one position per comparison char.
// 2. The source is scanned left to right. At each unconsumed position, the
//    source anchor is looked up, positions whose window is already consumed
//    are pruned, and up to `max_candidates_per_anchor` of the remaining ones
//    are extended forward, then backward, while chars keep matching and
//    neither side runs into an already-consumed range.
// 3. The longest extension wins (earliest comparison position on ties). Both
//    spans are marked consumed and the scan resumes after the source span.
//
// Memory is linear in the comparison length.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use super::consumed::ConsumedRanges;
use super::segment::{MatchSegment, MatchSet};

/// Default shortest span worth reporting, in characters.
pub const DEFAULT_MIN_MATCH_LEN: usize = 30;
/// Default cap on candidates extended per source position.
pub const DEFAULT_MAX_CANDIDATES: usize = 256;

#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Shortest span (in chars) that counts as a match
    pub min_match_len: usize,
    /// How many unconsumed comparison positions to try per source position.
    /// Bounds the work on highly repetitive text.
    pub max_candidates_per_anchor: usize,
    /// Compare case-folded chars; reported text keeps the original case
    pub ignore_case: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_match_len: DEFAULT_MIN_MATCH_LEN,
            max_candidates_per_anchor: DEFAULT_MAX_CANDIDATES,
            ignore_case: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentMatcher {
    config: MatcherConfig,
}

/// Best extension found for one source position.
struct Candidate {
    source_start: usize,
    comparison_start: usize,
    len: usize,
}

impl SegmentMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        if config.min_match_len == 0 {
            anyhow::bail!("min_match_len must be at least 1, got 0");
        }
        if config.max_candidates_per_anchor == 0 {
            anyhow::bail!("max_candidates_per_anchor must be at least 1, got 0");
        }
        Ok(Self { config })
    }

    /// Find every non-overlapping shared span of at least `min_match_len`
    /// chars, in source order.
    ///
    /// Identical texts produce a single segment covering the whole text.
    pub fn find_matches(&self, source: &str, comparison: &str) -> MatchSet {
        let min_len = self.config.min_match_len;

        let src_orig: Vec<char> = source.chars().collect();
        let cmp_orig: Vec<char> = comparison.chars().collect();
        if src_orig.len() < min_len || cmp_orig.len() < min_len {
            return MatchSet::default();
        }

        let src = self.fold(&src_orig);
        let cmp = self.fold(&cmp_orig);

        let mut index = self.build_index(&cmp);
        debug!(
            source_chars = src.len(),
            comparison_chars = cmp.len(),
            anchors = index.len(),
            "Built anchor index"
        );

        let mut src_consumed = ConsumedRanges::new();
        let mut cmp_consumed = ConsumedRanges::new();
        let mut segments = Vec::new();

        let mut i = 0;
        while i + min_len <= src.len() {
            if src_consumed.contains(i) {
                i += 1;
                continue;
            }

            let Some(positions) = index.get_mut(&src[i..i + min_len]) else {
                i += 1;
                continue;
            };
            // Consumed ranges only grow, so a pruned window never frees up again
            positions.retain(|&j| !cmp_consumed.overlaps(&(j..j + min_len)));
            let tried = &positions[..positions.len().min(self.config.max_candidates_per_anchor)];

            match self.best_extension(&src, &cmp, i, tried, &src_consumed, &cmp_consumed) {
                Some(found) => {
                    let src_range = found.source_start..found.source_start + found.len;
                    let cmp_range = found.comparison_start..found.comparison_start + found.len;

                    debug!(
                        source_start = found.source_start,
                        comparison_start = found.comparison_start,
                        len = found.len,
                        "Recorded match segment"
                    );

                    segments.push(MatchSegment {
                        source_start: found.source_start,
                        comparison_start: found.comparison_start,
                        len: found.len,
                        source_text: src_orig[src_range.clone()].iter().collect(),
                        comparison_text: cmp_orig[cmp_range.clone()].iter().collect(),
                    });

                    i = src_range.end;
                    src_consumed.insert(src_range);
                    cmp_consumed.insert(cmp_range);
                }
                None => i += 1,
            }
        }

        MatchSet::new(segments)
    }

    fn fold(&self, chars: &[char]) -> Vec<char> {
        if self.config.ignore_case {
            // First lowercase char only, so positions line up with the original
            chars
                .iter()
                .map(|c| c.to_lowercase().next().unwrap_or(*c))
                .collect()
        } else {
            chars.to_vec()
        }
    }

    /// Map each anchor window of the comparison text to all of its start
    /// positions, earliest first.
    fn build_index<'a>(&self, cmp: &'a [char]) -> HashMap<&'a [char], Vec<usize>> {
        let mut index: HashMap<&[char], Vec<usize>> = HashMap::new();
        for (pos, window) in cmp.windows(self.config.min_match_len).enumerate() {
            index.entry(window).or_default().push(pos);
        }
        index
    }

    fn best_extension(
        &self,
        src: &[char],
        cmp: &[char],
        i: usize,
        positions: &[usize],
        src_consumed: &ConsumedRanges,
        cmp_consumed: &ConsumedRanges,
    ) -> Option<Candidate> {
        let min_len = self.config.min_match_len;

        // Everything consumed on the source side lies behind the scan
        let src_floor = src_consumed.prev_end_before(i).unwrap_or(0);

        let mut best: Option<Candidate> = None;
        for &j in positions {
            let cmp_limit = cmp_consumed.next_start_from(j).unwrap_or(cmp.len());
            let cmp_floor = cmp_consumed.prev_end_before(j).unwrap_or(0);

            let mut forward = min_len;
            while i + forward < src.len()
                && j + forward < cmp_limit
                && src[i + forward] == cmp[j + forward]
            {
                forward += 1;
            }

            let mut backward = 0;
            while i - backward > src_floor
                && j - backward > cmp_floor
                && src[i - backward - 1] == cmp[j - backward - 1]
            {
                backward += 1;
            }

            let len = forward + backward;
            if best.as_ref().map_or(true, |b| len > b.len) {
                best = Some(Candidate {
                    source_start: i - backward,
                    comparison_start: j - backward,
                    len,
                });
            }
        }

        best
    }
}
