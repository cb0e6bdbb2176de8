//! Labeled concatenation of event windows.

use ndarray::{Array2, ArrayView2, Axis};
use serde::Serialize;

use crate::error::{AlignError, Result};
use crate::signal::WindowedSignal;

/// Rows from many event windows stacked into one table.
///
/// Rows are ordered by axis index and every axis index appears at most
/// once; when windows overlap, the row from the earlier window wins. Each
/// row keeps the label and color of the window it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSignals {
    channels: Vec<String>,
    indices: Vec<usize>,
    times: Vec<f64>,
    labels: Vec<String>,
    colors: Vec<String>,
    data: Array2<f64>,
}

impl EventSignals {
    pub fn empty(channels: Vec<String>) -> Self {
        let width = channels.len();
        Self {
            channels,
            indices: Vec::new(),
            times: Vec::new(),
            labels: Vec::new(),
            colors: Vec::new(),
            data: Array2::zeros((0, width)),
        }
    }

    /// Merge `windows`, all of which must carry exactly `channels`
    pub fn from_windows(channels: Vec<String>, windows: &[WindowedSignal]) -> Result<Self> {
        for w in windows {
            if w.channels() != channels.as_slice() {
                return Err(AlignError::ShapeMismatch {
                    expected: (w.len(), channels.len()),
                    actual: (w.len(), w.channels().len()),
                });
            }
        }

        // (axis index, window, row); stable sort keeps concatenation order on ties
        let mut rows: Vec<(usize, usize, usize)> = windows
            .iter()
            .enumerate()
            .flat_map(|(w, window)| {
                window
                    .indices()
                    .enumerate()
                    .map(move |(row, index)| (index, w, row))
            })
            .collect();
        rows.sort_by_key(|&(index, _, _)| index);

        let before = rows.len();
        rows.dedup_by_key(|&mut (index, _, _)| index);
        if rows.len() < before {
            tracing::debug!(
                dropped = before - rows.len(),
                "Dropped overlapping rows while merging event windows"
            );
        }

        let mut out = Self::empty(channels);
        let mut flat = Vec::with_capacity(rows.len() * out.channels.len());
        for &(index, w, row) in &rows {
            let window = &windows[w];
            out.indices.push(index);
            out.times.push(window.times()[row]);
            out.labels.push(window.label().to_string());
            out.colors.push(window.color().to_string());
            flat.extend(window.data().row(row).iter().copied());
        }
        out.data = Array2::from_shape_vec((rows.len(), out.channels.len()), flat).map_err(|_| {
            AlignError::ShapeMismatch {
                expected: (rows.len(), out.channels.len()),
                actual: (0, 0),
            }
        })?;
        Ok(out)
    }

    /// Rows whose label is one of `labels`
    pub fn filter_events(&self, labels: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| labels.contains(&l.as_str()))
            .map(|(i, _)| i)
            .collect();

        Self {
            channels: self.channels.clone(),
            indices: keep.iter().map(|&i| self.indices[i]).collect(),
            times: keep.iter().map(|&i| self.times[i]).collect(),
            labels: keep.iter().map(|&i| self.labels[i].clone()).collect(),
            colors: keep.iter().map(|&i| self.colors[i].clone()).collect(),
            data: self.data.select(Axis(0), &keep),
        }
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Axis index of each row
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Distinct labels in order of first appearance
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in &self.labels {
            if !seen.contains(&label.as_str()) {
                seen.push(label);
            }
        }
        seen
    }
}
