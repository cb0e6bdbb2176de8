//! Grouping of discrete event times into contiguous intervals (bouts).

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{AlignError, Result};

/// A contiguous stretch of time, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: f64,
    end: f64,
}

#[derive(Deserialize)]
struct RawInterval {
    start: f64,
    end: f64,
}

impl TryFrom<RawInterval> for Interval {
    type Error = AlignError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() {
            return Err(AlignError::NonFiniteTimestamp { value: start });
        }
        if !end.is_finite() {
            return Err(AlignError::NonFiniteTimestamp { value: end });
        }
        if end < start {
            return Err(AlignError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Zero-length interval at `t`
    pub fn point(t: f64) -> Self {
        Self { start: t, end: t }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Split `times` into maximal runs whose consecutive differences are all
/// `<= gap_threshold`.
///
/// Returns index ranges into `times` which together cover every index exactly
/// once. `times` must already be sorted ascending.
pub fn group_runs(times: &[f64], gap_threshold: f64) -> Result<Vec<Range<usize>>> {
    if times.is_empty() {
        return Err(AlignError::EmptySequence);
    }

    let mut runs = Vec::new();
    let mut run_start = 0;
    for (i, pair) in times.windows(2).enumerate() {
        if pair[1] - pair[0] > gap_threshold {
            runs.push(run_start..i + 1);
            run_start = i + 1;
        }
    }
    runs.push(run_start..times.len());
    Ok(runs)
}

/// One [`Interval`] per run of closely spaced timestamps.
///
/// A new interval starts whenever the distance to the previous timestamp
/// exceeds `gap_threshold`. A single timestamp yields a zero-length
/// interval. Fails with [`AlignError::EmptySequence`] for no input.
pub fn build_intervals(times: &[f64], gap_threshold: f64) -> Result<Vec<Interval>> {
    let runs = group_runs(times, gap_threshold)?;
    runs.into_iter()
        .map(|run| Interval::new(times[run.start], times[run.end - 1]))
        .collect()
}

/// Quiet windows between consecutive events spaced further apart than
/// `min_gap`.
///
/// Each returned interval runs from the event before the gap to the event
/// after it. Fewer than two events yield no windows.
pub fn find_gaps(times: &[f64], min_gap: f64) -> Vec<Interval> {
    times
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > min_gap)
        .map(|pair| Interval {
            start: pair[0],
            end: pair[1],
        })
        .collect()
}
