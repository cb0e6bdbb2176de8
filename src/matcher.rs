//! Nearest-sample matching of event timestamps onto an imaging time axis.
//!
//! Event logs are recorded independently of the imaging clock, so every
//! event time is snapped to the closest imaging sample before it is used to
//! cut windows out of the traces. Matching is a binary search followed by a
//! comparison of the two neighbouring samples, which keeps it monotonic:
//! if `q1 <= q2` then `match(q1) <= match(q2)`.

use crate::axis::TimeAxis;
use crate::error::{AlignError, Result};

/// Index of the sample in `times` closest to `query`.
///
/// `times` must be sorted ascending. Ties go to the lower index and queries
/// outside the covered range clamp to the first or last sample.
pub fn nearest_index(times: &[f64], query: f64) -> Result<usize> {
    if times.is_empty() {
        return Err(AlignError::EmptyAxis);
    }
    if !query.is_finite() {
        return Err(AlignError::NonFiniteTimestamp { value: query });
    }

    let upper = times.partition_point(|&t| t < query);
    if upper == 0 {
        return Ok(0);
    }
    if upper == times.len() {
        return Ok(times.len() - 1);
    }

    let below = query - times[upper - 1];
    let above = times[upper] - query;
    if below <= above {
        Ok(upper - 1)
    } else {
        Ok(upper)
    }
}

/// [`nearest_index`] applied to every query, preserving query order
pub fn nearest_indices(times: &[f64], queries: &[f64]) -> Result<Vec<usize>> {
    queries.iter().map(|&q| nearest_index(times, q)).collect()
}

impl TimeAxis {
    /// Index of the axis sample closest to `query`
    pub fn match_index(&self, query: f64) -> Result<usize> {
        nearest_index(self.as_slice(), query)
    }

    pub fn match_indices(&self, queries: &[f64]) -> Result<Vec<usize>> {
        nearest_indices(self.as_slice(), queries)
    }

    /// Axis time closest to `query`
    pub fn matched_time(&self, query: f64) -> Result<f64> {
        let index = self.match_index(query)?;
        Ok(self.as_slice()[index])
    }

    /// Axis times closest to each query
    pub fn matched_times(&self, queries: &[f64]) -> Result<Vec<f64>> {
        let times = self.as_slice();
        Ok(self
            .match_indices(queries)?
            .into_iter()
            .map(|i| times[i])
            .collect())
    }
}
