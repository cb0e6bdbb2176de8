//! Calcium Align - event alignment and trace segmentation for calcium-imaging sessions
//!
//! This crate lines up behavioral event logs (licks, tastant deliveries,
//! scored eating/grooming bouts) with the time axis of a calcium-imaging
//! recording and cuts the fluorescence traces into labeled per-event windows.
//!
//! # Overview
//!
//! Imaging traces and behavior are recorded on separate clocks. Before any
//! per-trial analysis can happen, every event has to be snapped onto the
//! imaging samples, repeated deliveries have to be reduced to genuine trial
//! onsets and the traces have to be cut around those onsets. Plotting and
//! statistics are left to the caller; this crate produces the aligned data
//! they consume.
//!
//! # Key Features
//!
//! - **Nearest-sample matching** of arbitrary timestamps onto the imaging axis
//! - **Bout detection** grouping closely spaced events into intervals
//! - **Trial selection** keeping only deliveries preceded by a fresh drylick
//! - **Segmentation** of traces into windows tagged with event label and color
//! - **Eating markers** with video-offset correction and approach sequences
//!
//! # Pipeline
//!
//! ```text
//! event table ──► EventLog ──► drylicks ──► select_trials ──► trial onsets
//!                    │                                            │
//! trace table ──► TimeAxis ──► match_index ◄──────────────────────┘
//!                    │
//!                    └──► segment ──► WindowedSignal ──► EventSignals
//! ```
//!
//! # Library Usage
//!
//! ```
//! use calcium_align::{select_trials, build_intervals, TimeAxis};
//!
//! let axis = TimeAxis::new(vec![0.0, 0.1, 0.2, 0.3, 0.4]).unwrap();
//! assert_eq!(axis.match_index(0.24).unwrap(), 2);
//!
//! let bouts = build_intervals(&[1.0, 1.2, 1.3, 5.0, 5.1], 0.5).unwrap();
//! assert_eq!(bouts.len(), 2);
//!
//! let trials = select_trials(&[2.0, 2.0, 4.0, 7.0], &[1.0, 3.0, 6.0]).unwrap();
//! assert_eq!(trials, vec![2.0, 4.0, 7.0]);
//! ```
//!
//! Modules:
//!
//! - [`axis`] - imaging time axis
//! - [`matcher`] - nearest-sample timestamp matching
//! - [`intervals`] - bout and gap detection
//! - [`events`] - event logs and trial selection
//! - [`signal`] - trace tables, windows and merged event signals
//! - [`session`] - one recording composed end to end
//! - [`eating`] - eating/grooming behavior markers
//! - [`config`] - analysis configuration and color palette
//!
//! # License
//!
//! This project is licensed under the GNU General Public License v3.0.

pub mod axis;
pub mod config;
pub mod eating;
pub mod error;
pub mod events;
pub mod intervals;
pub mod matcher;
pub mod session;
pub mod signal;

pub use axis::TimeAxis;
pub use config::{AnalysisConfig, ColorMap, EatingConfig};
pub use eating::{AlignedMarker, ApproachSequence, EatingData, EatingMarker};
pub use error::{AlignError, Result};
pub use events::{dedup_timestamps, select_trials, trial_times, Deduplicated, EventLog};
pub use intervals::{build_intervals, find_gaps, group_runs, Interval};
pub use matcher::{nearest_index, nearest_indices};
pub use session::{Session, SessionInfo};
pub use signal::{segment, segment_labeled, EventSignals, SignalTable, WindowedSignal};
