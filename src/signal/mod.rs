//! Trace tables and event-window segmentation.
//!
//! A [`SignalTable`] holds one row per imaging sample and one column per
//! cell. [`segment`] cuts the rows between two event times (snapped onto
//! the axis) into a [`WindowedSignal`] carrying the event's label and color.

pub mod collection;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;

use crate::axis::TimeAxis;
use crate::config::ColorMap;
use crate::error::{AlignError, Result};

pub use collection::EventSignals;

/// Fluorescence traces indexed by an imaging time axis.
///
/// `data` is `[samples × channels]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    axis: TimeAxis,
    channels: Vec<String>,
    data: Array2<f64>,
}

impl SignalTable {
    pub fn new(axis: TimeAxis, channels: Vec<String>, data: Array2<f64>) -> Result<Self> {
        let expected = (axis.len(), channels.len());
        if data.dim() != expected {
            return Err(AlignError::ShapeMismatch {
                expected,
                actual: data.dim(),
            });
        }
        Ok(Self {
            axis,
            channels,
            data,
        })
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_channels(&self) -> usize {
        self.data.ncols()
    }

    /// Inclusive sample-index bounds of the window between two event times.
    ///
    /// The order of `start` and `stop` does not matter.
    pub fn window_bounds(&self, start: f64, stop: f64) -> Result<(usize, usize)> {
        let a = self.axis.match_index(start)?;
        let b = self.axis.match_index(stop)?;
        Ok((a.min(b), a.max(b)))
    }

    /// Window between two sample indices (inclusive), clamped to the axis
    pub fn slice_indices(
        &self,
        start_index: usize,
        stop_index: usize,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> WindowedSignal {
        let last = self.axis.len() - 1;
        let lo = start_index.min(stop_index).min(last);
        let hi = start_index.max(stop_index).min(last);

        WindowedSignal {
            start_index: lo,
            stop_index: hi,
            times: self.axis.as_slice()[lo..=hi].to_vec(),
            channels: self.channels.clone(),
            data: self.data.slice(ndarray::s![lo..=hi, ..]).to_owned(),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Rows of a [`SignalTable`] between two samples, tagged with an event
/// label and display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowedSignal {
    start_index: usize,
    stop_index: usize,
    times: Vec<f64>,
    channels: Vec<String>,
    data: Array2<f64>,
    label: String,
    color: String,
}

impl WindowedSignal {
    /// Axis index of the first row
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Axis index of the last row
    pub fn stop_index(&self) -> usize {
        self.stop_index
    }

    /// Axis indices covered, in row order
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start_index..=self.stop_index
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn channel(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let col = self.channels.iter().position(|c| c == name)?;
        Some(self.data.column(col))
    }

    /// Copy of this window under a different label and color
    pub fn relabel(&self, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            ..self.clone()
        }
    }

    fn row_of(&self, index: usize) -> Result<usize> {
        if index < self.start_index || index > self.stop_index {
            return Err(AlignError::IndexOutOfWindow {
                index,
                start: self.start_index,
                stop: self.stop_index,
            });
        }
        Ok(index - self.start_index)
    }

    /// Per-channel mean over the rows at the given axis indices
    pub fn mean_at(&self, indices: &[usize]) -> Result<Vec<f64>> {
        if indices.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        let rows = indices
            .iter()
            .map(|&i| self.row_of(i))
            .collect::<Result<Vec<_>>>()?;
        let picked = self.data.select(Axis(0), &rows);
        Ok(picked
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_default())
    }

    /// Columns sorted by their mean over the two rows at `start_index` and
    /// `stop_index`, highest first.
    ///
    /// Channels with equal means keep their original relative order.
    pub fn reorder(&self, start_index: usize, stop_index: usize) -> Result<Self> {
        let means = self.mean_at(&[start_index, stop_index])?;

        let mut order: Vec<usize> = (0..self.channels.len()).collect();
        order.sort_by(|&a, &b| {
            means[b]
                .partial_cmp(&means[a])
                .unwrap_or_else(|| means[a].is_nan().cmp(&means[b].is_nan()))
        });

        Ok(Self {
            channels: order.iter().map(|&c| self.channels[c].clone()).collect(),
            data: self.data.select(Axis(1), &order),
            ..self.clone()
        })
    }

    /// Copy with negative values set to zero
    pub fn clamp_negative(&self) -> Self {
        Self {
            data: self.data.mapv(|v| if v < 0.0 { 0.0 } else { v }),
            ..self.clone()
        }
    }
}

/// Cut the window between two event times out of `table`.
///
/// Both bounds are snapped to the nearest axis sample; the window includes
/// both end samples and does not depend on the order of `start` and `stop`.
/// The window's color is looked up in `colors`.
pub fn segment(
    table: &SignalTable,
    start: f64,
    stop: f64,
    label: &str,
    colors: &ColorMap,
) -> Result<WindowedSignal> {
    let color = colors.color_for(label)?;
    segment_labeled(table, start, stop, label, color)
}

/// [`segment`] with an explicit color
pub fn segment_labeled(
    table: &SignalTable,
    start: f64,
    stop: f64,
    label: &str,
    color: &str,
) -> Result<WindowedSignal> {
    let (lo, hi) = table.window_bounds(start, stop)?;
    tracing::debug!(
        label,
        start,
        stop,
        start_index = lo,
        stop_index = hi,
        "Segmenting window"
    );
    Ok(table.slice_indices(lo, hi, label, color))
}
