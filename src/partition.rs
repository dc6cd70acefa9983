//! Balanced block decomposition of a diagonal across the process group.
//!
//! Rank `r` of `p` owns the contiguous positions `[r*n/p, (r+1)*n/p)` of a
//! line of length `n`. Block sizes differ by at most one and blocks are
//! ordered by rank, so a gather keyed on this partition reassembles the line
//! in place.

use std::ops::Range;

/// Partition of `[0, len)` into `parts` contiguous blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPartition {
    len: usize,
    parts: usize,
}

impl BlockPartition {
    /// # Panics
    /// Panics if `parts == 0`.
    pub fn new(len: usize, parts: usize) -> Self {
        assert!(parts > 0, "partition needs at least one part");
        Self { len, parts }
    }

    /// Total number of positions covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// First position owned by `part`.
    #[inline]
    pub fn low(&self, part: usize) -> usize {
        part * self.len / self.parts
    }

    /// One past the last position owned by `part`.
    #[inline]
    pub fn high(&self, part: usize) -> usize {
        self.low(part + 1)
    }

    #[inline]
    pub fn count(&self, part: usize) -> usize {
        self.high(part) - self.low(part)
    }

    #[inline]
    pub fn range(&self, part: usize) -> Range<usize> {
        self.low(part)..self.high(part)
    }

    /// Part owning position `index`.
    #[inline]
    pub fn owner(&self, index: usize) -> usize {
        debug_assert!(index < self.len);
        (self.parts * (index + 1) - 1) / self.len
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.parts).map(move |p| self.count(p))
    }

    pub fn displacements(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.parts).map(move |p| self.low(p))
    }
}

#[cfg(test)]
mod tests {
    use super::BlockPartition;

    #[test]
    fn blocks_cover_range_in_order() {
        let p = BlockPartition::new(10, 3);
        let ranges: Vec<_> = (0..3).map(|r| p.range(r)).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
        assert_eq!(p.counts().sum::<usize>(), 10);
        assert_eq!(p.displacements().collect::<Vec<_>>(), vec![0, 3, 6]);
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        for len in 1..40 {
            for parts in 1..=len {
                let p = BlockPartition::new(len, parts);
                let min = p.counts().min().unwrap();
                let max = p.counts().max().unwrap();
                assert!(max - min <= 1, "len={len} parts={parts}");
                assert!(min >= 1);
            }
        }
    }

    #[test]
    fn owner_matches_ranges() {
        for (len, parts) in [(7, 3), (16, 4), (5, 5), (9, 2)] {
            let p = BlockPartition::new(len, parts);
            for part in 0..parts {
                for index in p.range(part) {
                    assert_eq!(p.owner(index), part);
                }
            }
        }
    }

    #[test]
    fn empty_partition_has_empty_blocks() {
        let p = BlockPartition::new(0, 4);
        assert!(p.is_empty());
        assert!(p.counts().all(|c| c == 0));
    }

    #[test]
    #[should_panic]
    fn zero_parts_panics() {
        let _ = BlockPartition::new(3, 0);
    }
}
