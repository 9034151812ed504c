// Interval set of character ranges already claimed by a reported match.
//
// Ranges are half-open `[start, end)`, kept sorted and disjoint. Inserting a
// range merges it with any neighbor it overlaps or touches, so lookups are a
// single binary search.

use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub struct ConsumedRanges {
    ranges: Vec<Range<usize>>,
}

impl ConsumedRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `range` as consumed. Empty ranges are ignored.
    pub fn insert(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }

        // First stored range that ends at or after the new start (touching counts)
        let first = self.ranges.partition_point(|r| r.end < range.start);
        // First stored range that starts strictly after the new end
        let last = self.ranges.partition_point(|r| r.start <= range.end);

        let mut merged = range;
        if first < last {
            merged.start = merged.start.min(self.ranges[first].start);
            merged.end = merged.end.max(self.ranges[last - 1].end);
        }
        self.ranges.splice(first..last, std::iter::once(merged));
    }

    pub fn contains(&self, pos: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= pos);
        self.ranges.get(idx).is_some_and(|r| r.start <= pos)
    }

    /// Whether any position of `range` is already consumed.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        if range.start >= range.end {
            return false;
        }
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges.get(idx).is_some_and(|r| r.start < range.end)
    }

    /// Start of the first consumed range at or after `pos`, if any.
    pub fn next_start_from(&self, pos: usize) -> Option<usize> {
        let idx = self.ranges.partition_point(|r| r.end <= pos);
        self.ranges.get(idx).map(|r| r.start.max(pos))
    }

    /// End of the last consumed range at or before `pos`, if any.
    pub fn prev_end_before(&self, pos: usize) -> Option<usize> {
        let idx = self.ranges.partition_point(|r| r.start < pos);
        idx.checked_sub(1).map(|i| self.ranges[i].end.min(pos))
    }

    /// Total number of consumed positions.
    pub fn covered(&self) -> usize {
        self.ranges.iter().map(|r| r.end - r.start).sum()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}
