//! src/storage/history.rs
//!
//! Bounded per-line sample history (oldest at front).

use std::collections::VecDeque;

/// Append `items` to `dq`, keeping at most `cap` entries. Leading items of an
/// oversized batch are skipped rather than pushed and popped. Returns how many
/// entries (stored or skipped) fell out of the window.
pub fn extend_capped<T, I>(dq: &mut VecDeque<T>, items: I, cap: usize) -> usize
where
    I: ExactSizeIterator<Item = T>,
{
    let n = items.len();
    let skip = n.saturating_sub(cap);
    let overflow = (dq.len() + n - skip).saturating_sub(cap);
    dq.drain(..overflow);
    dq.extend(items.skip(skip));
    skip + overflow
}

#[derive(Debug, Clone)]
pub struct LineHistory {
    lines: Vec<VecDeque<f64>>,
    capacity: usize,
    /// Samples per line that have left the window since the last clear.
    evicted: u64,
    revision: u64,
}

impl LineHistory {
    pub fn new(line_count: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: (0..line_count)
                .map(|_| VecDeque::with_capacity(capacity.min(1 << 16)))
                .collect(),
            capacity,
            evicted: 0,
            revision: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Retained samples per line.
    pub fn len(&self) -> usize {
        self.lines.first().map(VecDeque::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line(&self, index: usize) -> Option<&VecDeque<f64>> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[VecDeque<f64>] {
        &self.lines
    }

    /// Append `sample_count` samples to every line from line-major `data`.
    ///
    /// The caller guarantees `data.len() == line_count * sample_count`.
    /// Returns how many samples per line left the window.
    pub fn push_batch(&mut self, data: &[f64], sample_count: usize) -> usize {
        debug_assert_eq!(data.len(), self.lines.len() * sample_count);
        if sample_count == 0 {
            return 0;
        }
        let mut dropped = 0;
        for (line, values) in self.lines.iter_mut().zip(data.chunks_exact(sample_count)) {
            dropped = extend_capped(line, values.iter().copied(), self.capacity);
        }
        self.evicted += dropped as u64;
        self.revision += 1;
        dropped
    }

    /// Change the window size; existing samples are discarded.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.clear();
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.evicted = 0;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_capped_drops_oldest() {
        let mut dq: VecDeque<i32> = (0..4).collect();
        let gone = extend_capped(&mut dq, [4, 5].into_iter(), 5);
        assert_eq!(gone, 1);
        assert_eq!(dq, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn extend_capped_skips_head_of_oversized_batch() {
        let mut dq: VecDeque<i32> = (0..3).collect();
        let gone = extend_capped(&mut dq, 10..20, 4);
        assert_eq!(gone, 6 + 3);
        assert_eq!(dq, [16, 17, 18, 19]);
    }

    #[test]
    fn push_batch_splits_line_major_data() {
        let mut h = LineHistory::new(2, 10);
        h.push_batch(&[1.0, 2.0, 3.0, 10.0, 20.0, 30.0], 3);
        assert_eq!(h.len(), 3);
        assert_eq!(h.line(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(h.line(1).unwrap(), &[10.0, 20.0, 30.0]);
        assert_eq!(h.revision(), 1);
        assert_eq!(h.evicted(), 0);
    }

    #[test]
    fn eviction_is_counted_once_per_sample() {
        let mut h = LineHistory::new(2, 4);
        h.push_batch(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0], 3);
        h.push_batch(&[3.0, 4.0, 5.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(h.len(), 4);
        assert_eq!(h.evicted(), 2);
        assert_eq!(h.line(1).unwrap(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn empty_batch_keeps_revision() {
        let mut h = LineHistory::new(1, 4);
        assert_eq!(h.push_batch(&[], 0), 0);
        assert_eq!(h.revision(), 0);
    }

    #[test]
    fn set_capacity_clears() {
        let mut h = LineHistory::new(1, 4);
        h.push_batch(&[1.0, 2.0], 2);
        h.set_capacity(8);
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 8);
        assert_eq!(h.evicted(), 0);
    }
}
