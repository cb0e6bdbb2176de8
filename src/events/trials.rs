//! Trial selection.
//!
//! A tastant delivery only counts as a new trial when the animal dry-licked
//! at least once since the previous delivery of the same tastant. Repeated
//! deliveries inside one licking run are follow-ups of the same trial.

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::error::{AlignError, Result};
use crate::events::EventLog;

/// Sorted timestamps with exact duplicates removed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Deduplicated {
    pub unique: Vec<f64>,
    /// Every value removed, once per removal
    pub dropped: Vec<f64>,
}

/// Sort `raw` and drop exact duplicates.
///
/// Each dropped value is reported with a `tracing` warning.
pub fn dedup_timestamps(raw: &[f64]) -> Deduplicated {
    let mut sorted = raw.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut out = Deduplicated {
        unique: Vec::with_capacity(sorted.len()),
        dropped: Vec::new(),
    };
    for ts in sorted {
        if out.unique.last() == Some(&ts) {
            tracing::warn!(timestamp = ts, "Deleted duplicate timestamp {}", ts);
            out.dropped.push(ts);
        } else {
            out.unique.push(ts);
        }
    }
    out
}

/// Reduce raw delivery timestamps to trial onsets.
///
/// The earliest delivery is always a trial. Every later delivery `ts` is a
/// trial only if the latest reference event strictly before `ts` is more
/// recent than the delivery preceding `ts`. Fails with
/// [`AlignError::NoReferenceEvent`] when no reference event precedes a
/// later delivery, and with [`AlignError::NonFiniteTimestamp`] on NaN or
/// infinite input.
pub fn select_trials(raw_timestamps: &[f64], reference_events: &[f64]) -> Result<Vec<f64>> {
    if let Some(&value) = raw_timestamps
        .iter()
        .chain(reference_events)
        .find(|t| !t.is_finite())
    {
        return Err(AlignError::NonFiniteTimestamp { value });
    }
    let deliveries = dedup_timestamps(raw_timestamps).unique;
    let Some(&first) = deliveries.first() else {
        return Ok(Vec::new());
    };

    let mut reference = reference_events.to_vec();
    reference.sort_by(f64::total_cmp);

    let mut trials = vec![first];
    for pair in deliveries.windows(2) {
        let (previous, ts) = (pair[0], pair[1]);
        let preceding = reference.partition_point(|&r| r < ts);
        if preceding == 0 {
            return Err(AlignError::NoReferenceEvent { timestamp: ts });
        }
        if reference[preceding - 1] > previous {
            trials.push(ts);
        }
    }
    Ok(trials)
}

/// Trial onsets for every trial stimulus in `log`, using drylicks as the
/// reference events.
///
/// Stimuli listed in `config.non_trial_events` and stimuli that never
/// occurred are skipped.
pub fn trial_times(log: &EventLog, config: &AnalysisConfig) -> Result<BTreeMap<String, Vec<f64>>> {
    let drylicks = log.drylicks(&config.lick_event)?;

    let mut trials = BTreeMap::new();
    for stimulus in log.names() {
        if !config.is_trial_event(stimulus) {
            continue;
        }
        let raw = log.timestamps(stimulus)?;
        if raw.is_empty() {
            tracing::warn!(stimulus, "No deliveries, skipping trial selection");
            continue;
        }
        let selected = select_trials(raw, &drylicks)?;
        tracing::debug!(
            stimulus,
            deliveries = raw.len(),
            trials = selected.len(),
            "Selected trials"
        );
        trials.insert(stimulus.to_string(), selected);
    }
    Ok(trials)
}
