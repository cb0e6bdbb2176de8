//! Analysis configuration.
//!
//! Everything that used to live in module-level dictionaries (event colors,
//! excluded stimuli, gap thresholds, the eating-marker offset) is carried in
//! an [`AnalysisConfig`] value and handed to the routines that need it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AlignError, Result};

/// Event name to display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap(BTreeMap<String, String>);

impl ColorMap {
    /// A map with no colors. [`ColorMap::default`] holds the lab palette.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the color of an event, replacing any previous entry
    pub fn insert(&mut self, event: impl Into<String>, color: impl Into<String>) {
        self.0.insert(event.into(), color.into());
    }

    pub fn get(&self, event: &str) -> Option<&str> {
        self.0.get(event).map(String::as_str)
    }

    /// Color of an event, failing with [`AlignError::MissingColor`] if unset
    pub fn color_for(&self, event: &str) -> Result<&str> {
        self.get(event)
            .ok_or_else(|| AlignError::MissingColor(event.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The lab palette for tastants, licks and eating markers
impl Default for ColorMap {
    fn default() -> Self {
        [
            ("ArtSal", "dodgerblue"),
            ("MSG", "darkorange"),
            ("NaCl", "lime"),
            ("Sucrose", "magenta"),
            ("Citric", "yellow"),
            ("Quinine", "red"),
            ("Rinse", "lightsteelblue"),
            ("Lick", "darkgray"),
            ("Approach", "royalblue"),
            ("Entry", "orange"),
            ("Eating", "green"),
            ("Grooming", "purple"),
            ("Doing Nothing", "gray"),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Settings for behavioral eating/grooming marker files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EatingConfig {
    /// Seconds added to every marker start and stop before matching
    pub offset: f64,
    /// Marker names kept; anything else in the marker log is dropped
    pub markers: Vec<String>,
    /// Marker used as the "nothing happening" baseline
    pub baseline_marker: String,
    /// Label given to baseline windows in the output signals
    pub baseline_label: String,
}

impl Default for EatingConfig {
    fn default() -> Self {
        Self {
            offset: 34.0,
            markers: ["Entry", "Eating", "Grooming", "Approach", "Interval"]
                .into_iter()
                .map(String::from)
                .collect(),
            baseline_marker: "Interval".to_string(),
            baseline_label: "Doing Nothing".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub colors: ColorMap,
    /// Name of the lick event column
    pub lick_event: String,
    /// Stimuli that never count as trials
    pub non_trial_events: Vec<String>,
    /// Gap (s) separating distinct taste-trial windows
    pub trial_gap: f64,
    /// Gap (s) separating distinct lick bouts
    pub bout_gap: f64,
    /// Minimum lick-free gap (s) treated as a spontaneous window
    pub spontaneous_gap: f64,
    pub eating: EatingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            colors: ColorMap::default(),
            lick_event: "Lick".to_string(),
            non_trial_events: vec!["Lick".to_string(), "Rinse".to_string()],
            trial_gap: 1.0,
            bout_gap: 1.0,
            spontaneous_gap: 30.0,
            eating: EatingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: AnalysisConfig =
            serde_json::from_str(json).context("Failed to parse analysis configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis configuration")
    }

    /// Check that thresholds are usable
    pub fn validate(&self) -> Result<()> {
        for (name, gap) in [
            ("trial_gap", self.trial_gap),
            ("bout_gap", self.bout_gap),
            ("spontaneous_gap", self.spontaneous_gap),
        ] {
            if !gap.is_finite() || gap <= 0.0 {
                return Err(AlignError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, gap
                )));
            }
        }
        if !self.eating.offset.is_finite() {
            return Err(AlignError::InvalidConfig(format!(
                "eating.offset must be finite, got {}",
                self.eating.offset
            )));
        }
        if self.lick_event.is_empty() {
            return Err(AlignError::InvalidConfig(
                "lick_event must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a stimulus takes part in trial selection
    pub fn is_trial_event(&self, stimulus: &str) -> bool {
        !self.non_trial_events.iter().any(|s| s == stimulus)
    }
}
