#![allow(dead_code)]

use calcium_align::{SignalTable, TimeAxis};
use ndarray::Array2;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Axis of `n` samples spaced `dt` apart, starting at zero
pub fn uniform_axis(n: usize, dt: f64) -> TimeAxis {
    TimeAxis::new((0..n).map(|i| i as f64 * dt).collect()).expect("valid axis")
}

/// Random strictly increasing axis
pub fn random_axis(rng: &mut fastrand::Rng, n: usize) -> TimeAxis {
    let mut t = rng.f64() * 10.0;
    let times = (0..n)
        .map(|_| {
            t += 0.01 + rng.f64() * 0.2;
            t
        })
        .collect();
    TimeAxis::new(times).expect("valid axis")
}

/// Table whose cell `(i, c)` holds `f(i, c)`
pub fn table_from_fn(axis: TimeAxis, channels: &[&str], f: impl Fn(usize, usize) -> f64) -> SignalTable {
    let data = Array2::from_shape_fn((axis.len(), channels.len()), |(i, c)| f(i, c));
    SignalTable::new(axis, channels.iter().map(|c| c.to_string()).collect(), data)
        .expect("valid table")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, *e);
    }
}

struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and count the warnings it emits
pub fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let counter = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(counter.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, counter.load(Ordering::SeqCst))
}
