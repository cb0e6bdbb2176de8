//! Error types shared by every alignment and segmentation routine.

/// Result type for alignment operations
pub type Result<T> = std::result::Result<T, AlignError>;

/// Errors raised while aligning events to an imaging time axis.
///
/// All of these are input-validation failures: calling again with the same
/// input fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlignError {
    #[error("Time axis has no samples")]
    EmptyAxis,

    #[error("No timestamps to group into intervals")]
    EmptySequence,

    #[error("No reference event precedes timestamp {timestamp:.6}")]
    NoReferenceEvent { timestamp: f64 },

    #[error("Time axis is not strictly increasing at index {index}: {previous:.6} -> {current:.6}")]
    NonMonotonicAxis {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Non-finite timestamp: {value}")]
    NonFiniteTimestamp { value: f64 },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Sample index {index} outside window {start}..={stop}")]
    IndexOutOfWindow {
        index: usize,
        start: usize,
        stop: usize,
    },

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("No color configured for event: {0}")]
    MissingColor(String),

    #[error("Interval end {end:.6} precedes start {start:.6}")]
    InvalidInterval { start: f64, end: f64 },

    #[error("Invalid session date '{0}', expected MMDDYY")]
    InvalidDate(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
