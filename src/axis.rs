//! Imaging time axis.

use serde::Serialize;

use crate::error::{AlignError, Result};

/// Strictly increasing sample times (seconds) of an imaging session.
///
/// Built once when the trace table is loaded and never modified afterwards.
/// Sampling is close to uniform but uniformity is not required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    times: Vec<f64>,
}

impl TimeAxis {
    /// Validate and wrap sample times.
    ///
    /// Fails with [`AlignError::EmptyAxis`] for no samples,
    /// [`AlignError::NonFiniteTimestamp`] for NaN/infinite values and
    /// [`AlignError::NonMonotonicAxis`] if any sample does not exceed its
    /// predecessor.
    pub fn new(times: Vec<f64>) -> Result<Self> {
        if times.is_empty() {
            return Err(AlignError::EmptyAxis);
        }
        if let Some(&value) = times.iter().find(|t| !t.is_finite()) {
            return Err(AlignError::NonFiniteTimestamp { value });
        }
        for (i, pair) in times.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(AlignError::NonMonotonicAxis {
                    index: i + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(Self { times })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated axis; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }

    pub fn first(&self) -> f64 {
        self.times[0]
    }

    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Duration covered by the axis
    pub fn span(&self) -> f64 {
        self.last() - self.first()
    }

    /// Whether `t` lies within `[first, last]`
    pub fn contains(&self, t: f64) -> bool {
        t >= self.first() && t <= self.last()
    }

    /// Sampling interval.
    ///
    /// Measured between the second and third samples, skipping the first
    /// frame which is often irregular in exported traces.
    pub fn binsize(&self) -> f64 {
        match self.times.len() {
            0 | 1 => 0.0,
            2 => self.times[1] - self.times[0],
            _ => self.times[2] - self.times[1],
        }
    }

    /// Indices of all samples whose time lies in `[start, stop]`
    pub fn range_indices(&self, start: f64, stop: f64) -> std::ops::Range<usize> {
        let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
        let begin = self.times.partition_point(|&t| t < lo);
        let end = self.times.partition_point(|&t| t <= hi);
        begin..end.max(begin)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}

impl AsRef<[f64]> for TimeAxis {
    fn as_ref(&self) -> &[f64] {
        &self.times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsorted_samples() {
        let err = TimeAxis::new(vec![0.0, 0.2, 0.1]).unwrap_err();
        assert_eq!(
            err,
            AlignError::NonMonotonicAxis {
                index: 2,
                previous: 0.2,
                current: 0.1
            }
        );
    }

    #[test]
    fn rejects_repeated_samples() {
        assert!(matches!(
            TimeAxis::new(vec![0.0, 0.1, 0.1]),
            Err(AlignError::NonMonotonicAxis { index: 2, .. })
        ));
    }

    #[test]
    fn binsize_skips_first_frame() {
        let axis = TimeAxis::new(vec![0.0, 0.05, 0.15, 0.25]).unwrap();
        assert!((axis.binsize() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn range_indices_is_inclusive() {
        let axis = TimeAxis::new(vec![0.0, 0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(axis.range_indices(0.1, 0.3), 1..4);
        assert_eq!(axis.range_indices(0.3, 0.1), 1..4);
        assert_eq!(axis.range_indices(0.11, 0.12), 2..2);
    }
}
