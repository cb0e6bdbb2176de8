//! Eating and grooming behavior markers.
//!
//! Markers are scored on video and exported as `(name, start, stop)` rows.
//! The video clock runs behind the imaging clock by a fixed offset, which is
//! added to both bounds before they are matched onto the imaging axis.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ColorMap, EatingConfig};
use crate::error::{AlignError, Result};
use crate::signal::{EventSignals, SignalTable, WindowedSignal};

const APPROACH: &str = "Approach";
const ENTRY: &str = "Entry";
const EATING: &str = "Eating";

/// A scored behavior interval in video time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EatingMarker {
    pub name: String,
    pub start: f64,
    pub stop: f64,
}

impl EatingMarker {
    pub fn new(name: impl Into<String>, start: f64, stop: f64) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
        }
    }
}

/// A marker after offset correction and matching onto the imaging axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedMarker {
    pub name: String,
    pub start: f64,
    pub stop: f64,
    pub start_index: usize,
    pub stop_index: usize,
}

/// Approach, Entry and Eating markers scored back to back
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachSequence {
    /// 1-based position of the Approach marker in the marker log
    pub ordinal: usize,
    pub approach: AlignedMarker,
    pub entry: AlignedMarker,
    pub eating: AlignedMarker,
    /// Traces from approach start to eating end
    pub signal: WindowedSignal,
}

impl ApproachSequence {
    /// Window prepared for a heatmap: cells ordered by their activity at
    /// entry start and eating end, negative values set to zero.
    pub fn heatmap_signal(&self) -> Result<WindowedSignal> {
        Ok(self
            .signal
            .reorder(self.entry.start_index, self.eating.stop_index)?
            .clamp_negative())
    }
}

#[derive(Debug, Clone)]
pub struct EatingData<'a> {
    table: &'a SignalTable,
    settings: &'a EatingConfig,
    colors: &'a ColorMap,
    markers: Vec<AlignedMarker>,
}

impl<'a> EatingData<'a> {
    /// Sort markers by start, apply the video offset, drop unconfigured
    /// marker names and match both bounds onto the imaging axis.
    pub fn new(
        table: &'a SignalTable,
        mut markers: Vec<EatingMarker>,
        config: &'a AnalysisConfig,
    ) -> Result<Self> {
        let settings = &config.eating;
        markers.sort_by(|a, b| a.start.total_cmp(&b.start));

        let axis = table.axis();
        let total = markers.len();
        let mut aligned = Vec::with_capacity(total);
        for marker in markers {
            if !settings.markers.contains(&marker.name) {
                continue;
            }
            let start_index = axis.match_index(marker.start + settings.offset)?;
            let stop_index = axis.match_index(marker.stop + settings.offset)?;
            aligned.push(AlignedMarker {
                name: marker.name,
                start: axis.as_slice()[start_index],
                stop: axis.as_slice()[stop_index],
                start_index,
                stop_index,
            });
        }

        tracing::debug!(
            kept = aligned.len(),
            dropped = total - aligned.len(),
            offset = settings.offset,
            "Aligned eating markers"
        );

        Ok(Self {
            table,
            settings,
            colors: &config.colors,
            markers: aligned,
        })
    }

    pub fn markers(&self) -> &[AlignedMarker] {
        &self.markers
    }

    fn label_of<'m>(&'m self, marker: &'m AlignedMarker) -> &'m str {
        if marker.name == self.settings.baseline_marker {
            &self.settings.baseline_label
        } else {
            &marker.name
        }
    }

    fn window(&self, marker: &AlignedMarker) -> Result<WindowedSignal> {
        let label = self.label_of(marker);
        let color = self.colors.color_for(label)?;
        Ok(self
            .table
            .slice_indices(marker.start_index, marker.stop_index, label, color))
    }

    /// One window per marker, in marker order
    pub fn windows(&self) -> Result<Vec<WindowedSignal>> {
        self.markers.iter().map(|m| self.window(m)).collect()
    }

    /// All marker windows merged into one labeled table
    pub fn signals(&self) -> Result<EventSignals> {
        let windows = self.windows()?;
        EventSignals::from_windows(self.table.channels().to_vec(), &windows)
    }

    /// Merged rows of the given labels only
    pub fn signals_for(&self, labels: &[&str]) -> Result<EventSignals> {
        Ok(self.signals()?.filter_events(labels))
    }

    /// Window of the first baseline marker
    pub fn baseline(&self) -> Result<WindowedSignal> {
        let marker = self
            .markers
            .iter()
            .find(|m| m.name == self.settings.baseline_marker)
            .ok_or_else(|| AlignError::UnknownEvent(self.settings.baseline_marker.clone()))?;
        self.window(marker)
    }

    /// Every Approach marker directly followed by Entry and then Eating
    pub fn approach_sequences(&self) -> Result<Vec<ApproachSequence>> {
        let mut sequences = Vec::new();
        for (idx, triple) in self.markers.windows(3).enumerate() {
            let [approach, entry, eating] = triple else {
                continue;
            };
            if approach.name != APPROACH || entry.name != ENTRY || eating.name != EATING {
                continue;
            }
            let color = self.colors.color_for(APPROACH)?;
            let signal =
                self.table
                    .slice_indices(approach.start_index, eating.stop_index, APPROACH, color);
            sequences.push(ApproachSequence {
                ordinal: idx + 1,
                approach: approach.clone(),
                entry: entry.clone(),
                eating: eating.clone(),
                signal,
            });
        }
        Ok(sequences)
    }
}
