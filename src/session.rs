//! A single imaging session: traces, behavioral events and configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::error::{AlignError, Result};
use crate::events::{trial_times, EventLog};
use crate::intervals::{build_intervals, find_gaps, Interval};
use crate::signal::{segment, EventSignals, SignalTable};

/// Animal and recording date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub animal: String,
    pub date: NaiveDate,
}

impl SessionInfo {
    pub fn new(animal: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            animal: animal.into(),
            date,
        }
    }

    /// Parse the lab's `MMDDYY` date label, e.g. `070121` for 2021-07-01
    pub fn from_label(animal: impl Into<String>, date: &str) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(date, "%m%d%y")
            .map_err(|_| AlignError::InvalidDate(date.to_string()))?;
        Ok(Self::new(animal, parsed))
    }

    /// Session identifier, `<animal>_<MMDDYY>`
    pub fn id(&self) -> String {
        format!("{}_{}", self.animal, self.date.format("%m%d%y"))
    }
}

/// Traces and events of one recording, ready for windowing.
#[derive(Debug, Clone)]
pub struct Session {
    info: SessionInfo,
    table: SignalTable,
    events: EventLog,
    config: AnalysisConfig,
}

impl Session {
    pub fn new(
        info: SessionInfo,
        table: SignalTable,
        events: EventLog,
        config: AnalysisConfig,
    ) -> Result<Self> {
        config.validate()?;
        let licks = events.lick_count(&config.lick_event)?;

        tracing::info!(
            session = %info.id(),
            cells = table.num_channels(),
            samples = table.num_samples(),
            licks,
            "Session loaded"
        );

        Ok(Self {
            info,
            table,
            events,
            config,
        })
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn table(&self) -> &SignalTable {
        &self.table
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Stimuli that take part in trial selection, in log order
    pub fn tastants(&self) -> Vec<&str> {
        self.events
            .names()
            .filter(|name| self.config.is_trial_event(name))
            .collect()
    }

    /// Trial onsets per tastant
    pub fn trial_times(&self) -> Result<BTreeMap<String, Vec<f64>>> {
        trial_times(&self.events, &self.config)
    }

    /// Drylicks snapped onto the imaging axis
    pub fn drylick_times(&self) -> Result<Vec<f64>> {
        let drylicks = self.events.drylicks(&self.config.lick_event)?;
        self.table.axis().matched_times(&drylicks)
    }

    /// All licks snapped onto the imaging axis
    pub fn lick_times(&self) -> Result<Vec<f64>> {
        let licks = self.events.timestamps(&self.config.lick_event)?;
        self.table.axis().matched_times(licks)
    }

    /// Lick bouts on the imaging axis; empty if the animal never licked
    pub fn lick_bouts(&self) -> Result<Vec<Interval>> {
        let licks = self.lick_times()?;
        if licks.is_empty() {
            return Ok(Vec::new());
        }
        build_intervals(&licks, self.config.bout_gap)
    }

    /// Every axis sample that falls inside a lick bout
    pub fn bout_sample_times(&self) -> Result<Vec<f64>> {
        let axis = self.table.axis();
        let mut times = Vec::new();
        for bout in self.lick_bouts()? {
            let range = axis.range_indices(bout.start(), bout.end());
            times.extend_from_slice(&axis.as_slice()[range]);
        }
        Ok(times)
    }

    /// Lick-free stretches longer than the configured spontaneous gap
    pub fn spontaneous_windows(&self) -> Result<Vec<Interval>> {
        let licks = self.events.timestamps(&self.config.lick_event)?;
        Ok(find_gaps(licks, self.config.spontaneous_gap))
    }

    /// Trace windows around every tastant delivery run.
    ///
    /// Deliveries of each tastant are grouped with the trial gap, each group
    /// is cut out of the traces and tagged with the tastant and its color.
    pub fn taste_trial_signals(&self) -> Result<EventSignals> {
        let mut windows = Vec::new();
        for tastant in self.tastants() {
            let mut stamps = self.events.timestamps(tastant)?.to_vec();
            if stamps.is_empty() {
                continue;
            }
            stamps.sort_by(f64::total_cmp);

            for interval in build_intervals(&stamps, self.config.trial_gap)? {
                windows.push(segment(
                    &self.table,
                    interval.start(),
                    interval.end(),
                    tastant,
                    &self.config.colors,
                )?);
            }
        }

        let signals = EventSignals::from_windows(self.table.channels().to_vec(), &windows)?;
        tracing::info!(
            session = %self.info.id(),
            windows = windows.len(),
            rows = signals.len(),
            "Taste signals set"
        );
        Ok(signals)
    }
}
