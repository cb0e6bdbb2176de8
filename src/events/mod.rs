//! Behavioral event logs.
//!
//! An event log maps each stimulus name (tastants, `Lick`, `Rinse`, ...) to
//! the raw timestamps at which it occurred. The timestamps come from the
//! behavior rig's clock and still need to be matched onto the imaging axis
//! before they can be used to cut trace windows.

pub mod trials;

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{AlignError, Result};

pub use trials::{dedup_timestamps, select_trials, trial_times, Deduplicated};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLog {
    /// Stimulus names in table column order
    order: Vec<String>,
    timestamps: HashMap<String, Vec<f64>>,
}

impl EventLog {
    /// Build a log from `(name, timestamps)` pairs.
    ///
    /// Names keep their first-seen order; a repeated name appends to the
    /// existing entry. Each entry is sorted ascending.
    pub fn new<S, I>(entries: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut log = Self {
            order: Vec::new(),
            timestamps: HashMap::new(),
        };
        for (name, stamps) in entries {
            if let Some(&value) = stamps.iter().find(|t| !t.is_finite()) {
                return Err(AlignError::NonFiniteTimestamp { value });
            }
            let name = name.into();
            match log.timestamps.get_mut(&name) {
                Some(existing) => existing.extend(stamps),
                None => {
                    log.order.push(name.clone());
                    log.timestamps.insert(name, stamps);
                }
            }
        }
        for stamps in log.timestamps.values_mut() {
            stamps.sort_by(f64::total_cmp);
        }
        Ok(log)
    }

    /// Build a log from an event table: a time column plus one flag column
    /// per stimulus, where a flag of `1` marks an occurrence at that row's
    /// time.
    pub fn from_flags<S, I>(times: &[f64], columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut entries = Vec::new();
        for (name, flags) in columns {
            if flags.len() != times.len() {
                return Err(AlignError::ShapeMismatch {
                    expected: (times.len(), 1),
                    actual: (flags.len(), 1),
                });
            }
            let stamps: Vec<f64> = times
                .iter()
                .zip(&flags)
                .filter(|(_, flag)| **flag == 1.0)
                .map(|(&t, _)| t)
                .collect();
            entries.push((name.into(), stamps));
        }
        Self::new(entries)
    }

    /// Stimulus names in load order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timestamps.contains_key(name)
    }

    pub fn timestamps(&self, name: &str) -> Result<&[f64]> {
        self.timestamps
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AlignError::UnknownEvent(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every timestamp of every stimulus other than `lick_event`
    pub fn all_stimulus_times(&self, lick_event: &str) -> Vec<f64> {
        self.order
            .iter()
            .filter(|name| name.as_str() != lick_event)
            .flat_map(|name| self.timestamps[name].iter().copied())
            .collect()
    }

    /// Licks that do not coincide with any stimulus delivery.
    ///
    /// Coincidence is exact equality of raw timestamps, since deliveries are
    /// logged on the same row as the lick that triggered them.
    pub fn drylicks(&self, lick_event: &str) -> Result<Vec<f64>> {
        let licks = self.timestamps(lick_event)?;
        let stimuli = self.all_stimulus_times(lick_event);
        Ok(licks
            .iter()
            .copied()
            .filter(|lick| !stimuli.contains(lick))
            .collect())
    }

    pub fn lick_count(&self, lick_event: &str) -> Result<usize> {
        Ok(self.timestamps(lick_event)?.len())
    }
}
