//! src/validate.rs
//!
//! Pre-ingestion checks for raw sample batches.
//!
//! Large batches are checked in chunks on the rayon pool; the buffer fill path
//! itself stays single-threaded.

use rayon::prelude::*;

/// Which samples count as invalid and what replaces them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataCheckParams {
    pub check_nan: bool,
    pub check_infinity: bool,
    /// Value written in place of every rejected sample.
    pub replacement: f64,
    /// Batches with at least this many values are checked in parallel.
    pub parallel_threshold: usize,
    /// Number of chunks a parallel check is split into.
    pub workers: usize,
}

impl DataCheckParams {
    /// No checks at all; batches pass through untouched.
    pub fn disabled() -> Self {
        Self {
            check_nan: false,
            check_infinity: false,
            ..Self::default()
        }
    }

    fn is_enabled(&self) -> bool {
        self.check_nan || self.check_infinity
    }

    fn rejects(&self, v: f64) -> bool {
        (self.check_nan && v.is_nan()) || (self.check_infinity && v.is_infinite())
    }
}

impl Default for DataCheckParams {
    fn default() -> Self {
        Self {
            check_nan: true,
            check_infinity: true,
            replacement: 0.0,
            parallel_threshold: 1 << 16,
            workers: rayon::current_num_threads(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParallelHandler {
    params: DataCheckParams,
}

impl ParallelHandler {
    pub fn new(params: DataCheckParams) -> Self {
        Self { params }
    }

    /// Replace rejected samples in place. Returns how many were replaced.
    pub fn sanitize(&self, data: &mut [f64]) -> usize {
        if !self.params.is_enabled() || data.is_empty() {
            return 0;
        }
        let workers = self.params.workers.max(1);
        if workers == 1 || data.len() < self.params.parallel_threshold {
            return sanitize_chunk(&self.params, data);
        }

        let chunk = data.len().div_ceil(workers);
        let params = &self.params;
        data.par_chunks_mut(chunk)
            .map(|part| sanitize_chunk(params, part))
            .sum()
    }
}

fn sanitize_chunk(params: &DataCheckParams, data: &mut [f64]) -> usize {
    let mut replaced = 0;
    for v in data.iter_mut() {
        if params.rejects(*v) {
            *v = params.replacement;
            replaced += 1;
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(workers: usize, parallel_threshold: usize) -> DataCheckParams {
        DataCheckParams {
            workers,
            parallel_threshold,
            ..DataCheckParams::default()
        }
    }

    #[test]
    fn replaces_nan_and_infinity() {
        let handler = ParallelHandler::new(params(1, usize::MAX));
        let mut data = [1.0, f64::NAN, f64::INFINITY, -2.0, f64::NEG_INFINITY];
        assert_eq!(handler.sanitize(&mut data), 3);
        assert_eq!(data, [1.0, 0.0, 0.0, -2.0, 0.0]);
    }

    #[test]
    fn nan_only_check_keeps_infinity() {
        let handler = ParallelHandler::new(DataCheckParams {
            check_infinity: false,
            replacement: -1.0,
            ..params(1, usize::MAX)
        });
        let mut data = [f64::NAN, f64::INFINITY];
        assert_eq!(handler.sanitize(&mut data), 1);
        assert_eq!(data[0], -1.0);
        assert!(data[1].is_infinite());
    }

    #[test]
    fn disabled_checks_leave_data_alone() {
        let handler = ParallelHandler::new(DataCheckParams::disabled());
        let mut data = [f64::NAN];
        assert_eq!(handler.sanitize(&mut data), 0);
        assert!(data[0].is_nan());
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let mut data: Vec<f64> = (0..10_001)
            .map(|i| if i % 7 == 0 { f64::NAN } else { i as f64 })
            .collect();
        let mut expected = data.clone();

        let seq = ParallelHandler::new(params(1, usize::MAX)).sanitize(&mut expected);
        let par = ParallelHandler::new(params(4, 16)).sanitize(&mut data);

        assert_eq!(seq, par);
        assert_eq!(seq, 10_001usize.div_ceil(7));
        assert_eq!(data, expected);
    }
}
